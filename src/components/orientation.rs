use nalgebra::{Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{wrap_degrees, VECTOR_EPSILON};

/// Local orientation of a vehicle in a Y-up world.
///
/// Local X is forward, local Y is up and local Z points to the vehicle's right. Yaw turns
/// about local Y, pitch about local Z (positive raises the nose) and roll about local X.
/// The public API speaks degrees; internally the frame is a unit quaternion mapping local
/// vectors to world vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationFrame {
    rotation: UnitQuaternion<f64>,
}

impl Default for OrientationFrame {
    fn default() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
        }
    }
}

impl OrientationFrame {
    pub fn from_angles(yaw: f64, pitch: f64, roll: f64) -> Self {
        let mut frame = Self::default();
        frame.set_angles(yaw, pitch, roll);
        frame
    }

    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self { rotation }
    }

    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    /// Replaces the frame with `yaw`, then `pitch`, then `roll` applied in local space.
    pub fn set_angles(&mut self, yaw: f64, pitch: f64, roll: f64) {
        self.rotation = UnitQuaternion::identity();
        self.rotate_local_yaw(yaw);
        self.rotate_local_pitch(pitch);
        self.rotate_local_roll(roll);
    }

    pub fn rotate_local_yaw(&mut self, degrees: f64) {
        self.rotate_local(&Vector3::y_axis(), degrees);
    }

    pub fn rotate_local_pitch(&mut self, degrees: f64) {
        self.rotate_local(&Vector3::z_axis(), degrees);
    }

    pub fn rotate_local_roll(&mut self, degrees: f64) {
        self.rotate_local(&Vector3::x_axis(), degrees);
    }

    fn rotate_local(&mut self, axis: &Unit<Vector3<f64>>, degrees: f64) {
        if degrees == 0.0 {
            return;
        }
        let delta = UnitQuaternion::from_axis_angle(axis, degrees.to_radians());
        self.rotation = self.rotation * delta;
        self.rotation.renormalize_fast();
    }

    /// Rotates the whole frame about a world-space axis. A zero-length axis is ignored.
    pub fn rotate_global(&mut self, degrees: f64, axis: &Vector3<f64>) {
        if degrees == 0.0 {
            return;
        }
        let Some(axis) = Unit::try_new(*axis, VECTOR_EPSILON) else {
            return;
        };
        let delta = UnitQuaternion::from_axis_angle(&axis, degrees.to_radians());
        self.rotation = delta * self.rotation;
        self.rotation.renormalize_fast();
    }

    /// Transforms a vehicle-local offset into world space.
    pub fn find_local_vector_globally(&self, local: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * local
    }

    /// Transforms a world-space vector into vehicle-local space.
    pub fn find_global_vector_locally(&self, global: &Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse_transform_vector(global)
    }

    pub fn forward(&self) -> Vector3<f64> {
        self.rotation * Vector3::x()
    }

    pub fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    pub fn side(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    /// Heading in degrees, `[-180, 180)`.
    pub fn yaw(&self) -> f64 {
        let forward = self.forward();
        wrap_degrees((-forward.z).atan2(forward.x).to_degrees())
    }

    /// Nose elevation in degrees, `[-90, 90]`.
    pub fn pitch(&self) -> f64 {
        self.forward().y.clamp(-1.0, 1.0).asin().to_degrees()
    }

    /// Bank in degrees, `[-180, 180)`.
    pub fn roll(&self) -> f64 {
        let up = self.up();
        let side = self.side();
        wrap_degrees((-side.y).atan2(up.y).to_degrees())
    }
}
