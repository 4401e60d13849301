//! Per-tick force and motion model of a driveable.
//!
//! Each flight mode has its own attitude/force step; drag, brakes, fuel burn and the speed
//! cap are shared and run after it in that order.

mod common;
mod fixed_wing;
mod ground;
mod rotary_wing;

pub use common::{
    apply_brakes, apply_drag, apply_gravity, burn_fuel, cap_speed, control_deltas,
    control_sensitivity, engine_power, hover_throttle,
};
pub use fixed_wing::fixed_wing_step;
pub use ground::ground_step;
pub use rotary_wing::rotary_wing_step;

use crate::components::{FlightMode, Vehicle, VehicleType};
use crate::resources::DriveableConfig;

/// What the dynamics step observed, for the tick to turn into events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DynamicsReport {
    pub engine_power: f64,
    pub fuel_depleted: bool,
    pub speed_capped: bool,
}

/// Advances velocity and orientation of one vehicle by one tick. Position is left to the
/// suspension pass.
pub fn dynamics_step(
    vehicle: &mut Vehicle,
    vehicle_type: &VehicleType,
    config: &DriveableConfig,
) -> DynamicsReport {
    let physics = &config.physics;
    let start_speed = vehicle.state.speed().min(physics.speed_cap);
    let power = engine_power(vehicle_type, vehicle.can_thrust());

    let state = &mut vehicle.state;
    match state.mode {
        FlightMode::FixedWing => {
            fixed_wing_step(state, &vehicle.parts, vehicle_type, physics, power, start_speed)
        }
        FlightMode::RotaryWing => {
            rotary_wing_step(state, &vehicle.parts, vehicle_type, physics, power)
        }
        FlightMode::Ground => {
            ground_step(state, &vehicle.parts, vehicle_type, physics, power, start_speed)
        }
    }

    apply_drag(&mut state.velocity, vehicle_type.drag, start_speed, physics);
    if state.brakes_engaged || !state.has_controller {
        apply_brakes(
            &mut state.velocity,
            vehicle_type.brake_factor,
            physics.brake_speed_threshold,
        );
    }

    let mut fuel_depleted = false;
    if !state.unlimited_fuel {
        let had_fuel = vehicle.fuel.has_fuel();
        burn_fuel(
            &mut vehicle.fuel,
            state.throttle,
            vehicle_type.fuel_consumption,
            config.fuel.global_fuel_use_multiplier,
        );
        fuel_depleted = had_fuel && !vehicle.fuel.has_fuel();
    }

    let speed_capped = cap_speed(&mut state.velocity, physics.speed_cap);

    DynamicsReport {
        engine_power: power,
        fuel_depleted,
        speed_capped,
    }
}
