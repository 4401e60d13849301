use crate::common::TestApp;
use driveable::components::{ControlInput, Vehicle, VehicleEvent, VehicleType};
use driveable::resources::{DriveableConfig, Terrain};
use driveable::systems::TickContext;

/// Ticks a vehicle `ticks` times on the authoritative side with the input returned by
/// `input_at(tick)`, collecting every event.
pub fn run_ticks<F>(
    vehicle: &mut Vehicle,
    vehicle_type: &VehicleType,
    config: &DriveableConfig,
    terrain: &Terrain,
    ticks: usize,
    mut input_at: F,
) -> Vec<VehicleEvent>
where
    F: FnMut(usize) -> ControlInput,
{
    let ctx = TickContext::authoritative(config, terrain);
    let mut events = Vec::new();
    for tick in 0..ticks {
        events.extend(vehicle.tick(vehicle_type, &input_at(tick), &ctx));
    }
    events
}

/// Velocity along the nose.
pub fn forward_speed(vehicle: &Vehicle) -> f64 {
    vehicle.velocity().dot(&vehicle.orientation().forward())
}

/// Runs fixed ticks until `condition` holds, at most `max_ticks` of them.
pub fn wait_for_condition<F>(test_app: &mut TestApp, mut condition: F, max_ticks: usize) -> bool
where
    F: FnMut(&mut TestApp) -> bool,
{
    for _ in 0..max_ticks {
        if condition(test_app) {
            return true;
        }
        test_app.run_ticks(1);
    }
    condition(test_app)
}
