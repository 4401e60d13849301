use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::VehicleState;
use crate::utils::{wrap_degrees, CAMERA_LERP_ALPHA, CAMERA_ZOOM_PER_SQRT_SPEED};

/// Third-person camera trailing a vehicle at a rotated local offset.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaseCamera {
    /// Entity being followed, `None` for a detached camera.
    #[serde(skip)]
    pub target: Option<Entity>,
    pub position: Vector3<f64>,
    pub previous_position: Vector3<f64>,
    /// Degrees, continuous: never jumps by a full turn between ticks.
    pub yaw: f64,
    pub pitch: f64,
    /// Vehicle-local offset, `(-10, 2, 0)` by default: behind and above.
    pub offset: Vector3<f64>,
    pub smoothing: f64,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            target: None,
            position: Vector3::zeros(),
            previous_position: Vector3::zeros(),
            yaw: 0.0,
            pitch: 0.0,
            offset: Vector3::new(-10.0, 2.0, 0.0),
            smoothing: CAMERA_LERP_ALPHA,
        }
    }
}

impl ChaseCamera {
    /// A camera starting on top of the vehicle it follows.
    pub fn following(target: Entity, state: &VehicleState, offset: Vector3<f64>) -> Self {
        Self {
            target: Some(target),
            position: state.position,
            previous_position: state.position,
            yaw: state.orientation.yaw() - 90.0,
            pitch: state.orientation.pitch(),
            offset,
            ..Default::default()
        }
    }

    /// Where the camera wants to be: the rotated offset, pulled out further the faster the
    /// vehicle goes.
    pub fn desired_position(&self, state: &VehicleState) -> Vector3<f64> {
        let zoom = state.speed().sqrt() * CAMERA_ZOOM_PER_SQRT_SPEED + 1.0;
        state.position + state.orientation.find_local_vector_globally(&self.offset) * zoom
    }

    pub fn follow(&mut self, state: &VehicleState) {
        self.previous_position = self.position;
        let desired = self.desired_position(state);
        self.position = self.position.lerp(&desired, self.smoothing);

        let yaw = state.orientation.yaw() - 90.0;
        self.yaw += wrap_degrees(yaw - self.yaw);
        self.pitch = state.orientation.pitch();
    }
}
