use nalgebra::Vector3;

use super::common::{apply_gravity, control_deltas, control_sensitivity, hover_throttle};
use crate::components::{PartHealthModel, PartId, VehicleState, VehicleType};
use crate::resources::FlightPhysicsConfig;
use crate::utils::{ROTOR_HORIZONTAL_FACTOR, THROTTLE_PULL};

/// Attitude and force update of a rotorcraft (or a VTOL in hover mode) for one tick.
///
/// With a controller the throttle settles on the hover throttle, without one it spools
/// down. Rotor thrust acts along the vehicle's up axis with its horizontal share halved.
/// Attitude control stays available whatever the tail's condition.
pub fn rotary_wing_step(
    state: &mut VehicleState,
    parts: &PartHealthModel,
    vehicle_type: &VehicleType,
    physics: &FlightPhysicsConfig,
    engine_power: f64,
) {
    let effective_power = engine_power * parts.proportion_working(&vehicle_type.rotors);
    let rest_throttle = if state.has_controller {
        hover_throttle(effective_power)
    } else {
        0.0
    };
    state.throttle = (state.throttle - rest_throttle) * THROTTLE_PULL + rest_throttle;

    let sensitivity = control_sensitivity(state.throttle, physics);
    let (yaw, pitch, roll) = control_deltas(&state.surfaces, &vehicle_type.modifiers, sensitivity);
    state.orientation.rotate_local_yaw(yaw);
    state.orientation.rotate_local_pitch(pitch);
    state.orientation.rotate_local_roll(roll);

    apply_gravity(&mut state.velocity, physics.gravity);

    let thrust = if parts.is_intact(PartId::Blades) {
        effective_power * state.throttle * physics.gravity
    } else {
        0.0
    };
    let up = state.orientation.up();
    state.velocity += Vector3::new(
        up.x * ROTOR_HORIZONTAL_FACTOR,
        up.y,
        up.z * ROTOR_HORIZONTAL_FACTOR,
    ) * thrust;
}
