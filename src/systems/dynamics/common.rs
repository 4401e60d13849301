use nalgebra::Vector3;

use crate::components::{ControlModifiers, ControlSurfaces, FuelSource, VehicleType};
use crate::resources::FlightPhysicsConfig;
use crate::utils::{clamp_magnitude, horizontal_speed, signum0};

/// Control authority for a throttle setting. Reverse throttle counts as idle.
pub fn control_sensitivity(throttle: f64, physics: &FlightPhysicsConfig) -> f64 {
    physics.sensitivity_multiplier * throttle.max(0.0).sqrt() + physics.sensitivity_offset
}

/// Yaw, pitch and roll deltas (degrees) commanded by the control surfaces this tick.
pub fn control_deltas(
    surfaces: &ControlSurfaces,
    modifiers: &ControlModifiers,
    sensitivity: f64,
) -> (f64, f64, f64) {
    let yaw = surfaces.yaw
        * if surfaces.yaw > 0.0 {
            modifiers.turn_left
        } else {
            modifiers.turn_right
        };
    let pitch = surfaces.pitch()
        * if surfaces.pitch() > 0.0 {
            modifiers.look_up
        } else {
            modifiers.look_down
        };
    let roll = surfaces.roll()
        * if surfaces.roll() > 0.0 {
            modifiers.roll_right
        } else {
            modifiers.roll_left
        };
    (yaw * sensitivity, pitch * sensitivity, roll * sensitivity)
}

/// Engine output at full throttle, zero when the vehicle cannot thrust. Forward thrust uses
/// it as a per-tick acceleration; rotors scale it by gravity.
pub fn engine_power(vehicle_type: &VehicleType, can_thrust: bool) -> f64 {
    if can_thrust {
        vehicle_type.max_throttle * vehicle_type.engine_rating
    } else {
        0.0
    }
}

/// Throttle at which rotor thrust exactly cancels gravity, limited to full throttle.
pub fn hover_throttle(effective_power: f64) -> f64 {
    if effective_power > 0.0 {
        (1.0 / effective_power).min(1.0)
    } else {
        0.0
    }
}

pub fn apply_gravity(velocity: &mut Vector3<f64>, gravity: f64) {
    velocity.y -= gravity;
}

/// Quadratic per-axis drag above the static threshold, a flat damping factor below it.
///
/// `start_speed` is the speed at the start of the tick, so the regime does not flip halfway
/// through the force accumulation. Drag never reverses an axis.
pub fn apply_drag(
    velocity: &mut Vector3<f64>,
    drag: f64,
    start_speed: f64,
    physics: &FlightPhysicsConfig,
) {
    if start_speed > physics.static_drag_threshold {
        let k = drag * physics.drag_multiplier;
        for component in velocity.iter_mut() {
            let loss = (*component * *component * k).min(component.abs());
            *component -= signum0(*component) * loss;
        }
    } else {
        *velocity *= physics.static_drag;
    }
}

/// Brakes act on the horizontal components only, and only below the brake threshold.
pub fn apply_brakes(velocity: &mut Vector3<f64>, brake_factor: f64, threshold: f64) {
    if horizontal_speed(velocity) < threshold {
        velocity.x *= brake_factor;
        velocity.z *= brake_factor;
    }
}

pub fn burn_fuel(fuel: &mut FuelSource, throttle: f64, consumption: f64, multiplier: f64) {
    fuel.consume(throttle.abs() * consumption * multiplier);
}

/// Uniformly rescales the velocity down to `speed_cap`. Returns whether it was capped.
pub fn cap_speed(velocity: &mut Vector3<f64>, speed_cap: f64) -> bool {
    clamp_magnitude(velocity, speed_cap)
}
