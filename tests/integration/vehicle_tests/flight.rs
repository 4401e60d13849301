use approx::assert_relative_eq;
use driveable::components::{ControlInput, ControlKey, PartId, VehicleEvent, VehicleType};
use nalgebra::Vector3;

use crate::common::{
    assert_attitude_eq, assert_position_eq, assert_vehicle_state_valid, forward_speed,
    long_range_biplane, open_sky, piloted, run_ticks, test_config,
};

#[test]
fn test_throttle_ramp_accelerates_level_flight() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = long_range_biplane();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 1000.0, 0.0));

    let mut previous = forward_speed(&vehicle);
    let mut settled = previous;
    for tick in 0..500 {
        let input = if tick < 100 {
            ControlInput::from_keys([ControlKey::Accelerate])
        } else {
            ControlInput::default()
        };
        run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 1, |_| input.clone());

        let speed = forward_speed(&vehicle);
        assert!(
            speed >= previous - 1e-12,
            "forward speed dropped at tick {}: {} -> {}",
            tick,
            previous,
            speed
        );
        previous = speed;
        if tick == 399 {
            settled = speed;
        }
    }

    assert_vehicle_state_valid(&vehicle);
    assert_relative_eq!(vehicle.throttle(), 1.0, epsilon = 1e-9);
    let cap = config.physics.speed_cap;
    assert!(previous > 0.8 * cap, "plane stalled short of the cap: {}", previous);
    assert_relative_eq!(previous, settled, epsilon = 1e-6);
    assert!(vehicle.state.speed() <= config.physics.speed_cap + 1e-12);
    assert!(vehicle.orientation().pitch().abs() < 1e-6);
    assert!(vehicle.fuel.has_fuel());
}

#[test]
fn test_long_burn_reports_depletion_once() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = VehicleType::biplane();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 1000.0, 0.0));

    let events = run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 400, |tick| {
        if tick < 100 {
            ControlInput::from_keys([ControlKey::Accelerate])
        } else {
            ControlInput::default()
        }
    });

    let depleted = events
        .iter()
        .filter(|event| **event == VehicleEvent::FuelDepleted)
        .count();
    assert_eq!(depleted, 1);
    assert_eq!(vehicle.fuel.level(), 0.0);
    assert!(!vehicle.can_thrust());
    assert!(events
        .iter()
        .any(|event| *event == VehicleEvent::StopPropulsionSound));
}

#[test]
fn test_helicopter_holds_hover() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = VehicleType::helicopter();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 100.0, 0.0));
    vehicle.state.throttle = 0.8;

    run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 50, |_| {
        ControlInput::default()
    });

    assert_vehicle_state_valid(&vehicle);
    assert_relative_eq!(vehicle.throttle(), 0.8, epsilon = 1e-9);
    assert_relative_eq!(vehicle.velocity().y, 0.0, epsilon = 1e-9);
    assert_position_eq(vehicle.position(), &Vector3::new(0.0, 100.0, 0.0), 1e-6);
}

#[test]
fn test_helicopter_without_pilot_spools_down_and_falls() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = VehicleType::helicopter();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 100.0, 0.0));
    vehicle.state.throttle = 0.8;
    vehicle.set_controller(false);

    run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 100, |_| {
        ControlInput::default()
    });

    assert!(vehicle.throttle() < 0.8 * 0.99_f64.powi(99));
    assert!(vehicle.velocity().y < 0.0);
    assert!(vehicle.position().y < 100.0);
}

#[test]
fn test_destroyed_tail_freezes_attitude() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = VehicleType::biplane();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 100.0, 0.0));
    vehicle.state.throttle = 0.5;
    let events = vehicle.apply_damage(PartId::Tail, 10_000);
    assert_eq!(events, vec![VehicleEvent::PartDestroyed(PartId::Tail)]);
    let before = *vehicle.orientation();

    run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 20, |_| {
        ControlInput::from_keys([ControlKey::YawLeft, ControlKey::PitchUp, ControlKey::RollLeft])
    });

    assert_attitude_eq(vehicle.orientation(), &before, 1e-6);
}

#[test]
fn test_missing_wing_rolls_toward_the_gap() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = long_range_biplane();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 1000.0, 0.0));
    vehicle.state.throttle = 1.0;
    vehicle.state.velocity = Vector3::new(2.0, 0.0, 0.0);
    vehicle.apply_damage(PartId::LeftWing, 10_000);

    run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 3, |_| {
        ControlInput::default()
    });

    // Left wing low: the right side of the plane tilts up.
    assert!(vehicle.orientation().side().y > 0.0);
}

#[test]
fn test_helicopter_without_tail_still_turns() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = VehicleType::helicopter();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 100.0, 0.0));
    vehicle.state.throttle = 0.8;
    vehicle.apply_damage(PartId::Tail, 10_000);
    assert!(!vehicle.parts.is_intact(PartId::Tail));

    run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 10, |_| {
        ControlInput::from_keys([ControlKey::YawLeft])
    });

    assert_vehicle_state_valid(&vehicle);
    assert!(vehicle.orientation().yaw() > 0.5, "no yaw: {}", vehicle.orientation().yaw());
}
