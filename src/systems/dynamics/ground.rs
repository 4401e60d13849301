use nalgebra::Vector3;

use super::common::{apply_gravity, control_deltas, control_sensitivity};
use crate::components::{PartHealthModel, VehicleState, VehicleType};
use crate::resources::FlightPhysicsConfig;
use crate::utils::{ALIGNMENT_ALPHA, ALIGNMENT_MIN_SPEED, VECTOR_EPSILON};

/// Heading projected onto the ground plane, `None` when the nose points straight up or down.
fn ground_heading(state: &VehicleState) -> Option<Vector3<f64>> {
    let forward = state.orientation.forward();
    Vector3::new(forward.x, 0.0, forward.z).try_normalize(VECTOR_EPSILON)
}

/// Force update of a wheeled vehicle for one tick: speed-scaled steering, tyre grip pulling
/// the horizontal velocity onto the heading, gravity and drive thrust. No lift.
pub fn ground_step(
    state: &mut VehicleState,
    parts: &PartHealthModel,
    vehicle_type: &VehicleType,
    physics: &FlightPhysicsConfig,
    engine_power: f64,
    start_speed: f64,
) {
    let forward_speed = ground_heading(state).map_or(0.0, |heading| state.velocity.dot(&heading));

    let sensitivity = control_sensitivity(state.throttle, physics);
    let (yaw, _, _) = control_deltas(&state.surfaces, &vehicle_type.modifiers, sensitivity);
    state.orientation.rotate_local_yaw(yaw * forward_speed);

    let Some(heading) = ground_heading(state) else {
        apply_gravity(&mut state.velocity, physics.gravity);
        return;
    };

    if start_speed > ALIGNMENT_MIN_SPEED {
        let horizontal = Vector3::new(state.velocity.x, 0.0, state.velocity.z);
        let gripped = horizontal.lerp(&(heading * forward_speed), ALIGNMENT_ALPHA);
        state.velocity.x = gripped.x;
        state.velocity.z = gripped.z;
    }

    apply_gravity(&mut state.velocity, physics.gravity);

    let drive_proportion = parts.proportion_working(&vehicle_type.propellers);
    let thrust = state.throttle * engine_power * drive_proportion;
    state.velocity += heading * thrust;
}
