use std::f64::consts::PI;

use super::common::{apply_gravity, control_deltas, control_sensitivity};
use crate::components::{PartHealthModel, PartId, VehicleState, VehicleType};
use crate::resources::FlightPhysicsConfig;
use crate::utils::{
    angle_between, horizontal_speed, ALIGNMENT_ALPHA, ALIGNMENT_MIN_SPEED,
    ALIGNMENT_MIN_THROTTLE, MAX_LIFT_FRACTION, MISSING_WING_ROLL, TAILLESS_LIFT_FACTOR,
};

/// Attitude and force update of a plane for one tick. Drag, brakes, fuel and the speed cap
/// are applied afterwards by the caller.
pub fn fixed_wing_step(
    state: &mut VehicleState,
    parts: &PartHealthModel,
    vehicle_type: &VehicleType,
    physics: &FlightPhysicsConfig,
    engine_power: f64,
    start_speed: f64,
) {
    let throttle = state.throttle;
    let sensitivity = control_sensitivity(throttle, physics);
    let (mut yaw, mut pitch, mut roll) =
        control_deltas(&state.surfaces, &vehicle_type.modifiers, sensitivity);

    let tail_intact = parts.is_intact(PartId::Tail);
    if !tail_intact {
        yaw = 0.0;
        pitch = 0.0;
        roll = 0.0;
    }
    let speed_xz = horizontal_speed(&state.velocity);
    if !parts.is_intact(PartId::LeftWing) {
        roll -= MISSING_WING_ROLL * speed_xz;
    }
    if !parts.is_intact(PartId::RightWing) {
        roll += MISSING_WING_ROLL * speed_xz;
    }

    state.orientation.rotate_local_yaw(yaw);
    state.orientation.rotate_local_pitch(pitch);
    state.orientation.rotate_local_roll(roll);

    let forward = state.orientation.forward();
    let propeller_proportion = parts.proportion_working(&vehicle_type.propellers);

    // Velocity is pulled toward the nose instead of modelling lift-induced turning. This has
    // to happen before any other force so they do not leak into the blended speed.
    if start_speed > ALIGNMENT_MIN_SPEED
        && throttle > ALIGNMENT_MIN_THROTTLE
        && state.has_controller
    {
        let alpha = throttle * propeller_proportion * ALIGNMENT_ALPHA;
        let target = forward * start_speed;
        if let Some(angle_of_attack) = angle_between(&target, &state.velocity) {
            let maneuver_drag = 1.0 - angle_of_attack * physics.maneuver_drag / PI;
            state.velocity = state.velocity.lerp(&(target * maneuver_drag), alpha);
        }
    }

    apply_gravity(&mut state.velocity, physics.gravity);

    let wings_intact = [PartId::LeftWing, PartId::RightWing]
        .iter()
        .filter(|&&wing| parts.is_intact(wing))
        .count();
    let mut lift = MAX_LIFT_FRACTION * physics.gravity * throttle * wings_intact as f64 / 2.0;
    if !tail_intact {
        lift *= TAILLESS_LIFT_FACTOR;
    }
    state.velocity.y += lift.clamp(0.0, physics.gravity);

    let thrust = throttle * engine_power * propeller_proportion;
    state.velocity += forward * thrust;
}
