use std::io::Write;

use driveable::components::{ControlInput, ControlKey, PartId, Vehicle, VehicleId, VehicleType};
use driveable::resources::{ConfigError, DriveableConfig, VehicleError};
use nalgebra::Vector3;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::{flat_ground, piloted, run_ticks, test_config};

/// A vehicle that has driven, burnt fuel and taken a hit, so every persisted field is
/// away from its spawn value.
fn worn_buggy() -> (VehicleType, Vehicle) {
    let vehicle_type = VehicleType::buggy();
    let mut vehicle = piloted(&vehicle_type, Vector3::new(0.0, 0.5, 0.0));
    run_ticks(&mut vehicle, &vehicle_type, &test_config(), &flat_ground(), 120, |tick| {
        if tick % 3 == 0 {
            ControlInput::from_keys([ControlKey::Accelerate, ControlKey::YawLeft])
        } else {
            ControlInput::from_keys([ControlKey::Accelerate])
        }
    });
    vehicle.apply_damage(PartId::TailWheel, 15);
    vehicle.parts.set_on_fire(PartId::Core, true);
    (vehicle_type, vehicle)
}

#[test]
fn test_record_round_trip_after_driving() {
    let (_, vehicle) = worn_buggy();

    let Ok(record) = vehicle.to_record() else {
        panic!("record failed");
    };
    let restored = match Vehicle::from_record(record) {
        Ok(restored) => restored,
        Err(err) => panic!("restore failed: {}", err),
    };

    assert_eq!(restored, vehicle);
}

#[test]
fn test_restored_vehicle_continues_identically() {
    let (vehicle_type, mut vehicle) = worn_buggy();
    let mut file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => panic!("tempfile: {}", err),
    };
    let Ok(json) = vehicle.to_json() else {
        panic!("serialization failed");
    };
    assert!(file.write_all(json.as_bytes()).is_ok());

    let Ok(contents) = std::fs::read_to_string(file.path()) else {
        panic!("read back failed");
    };
    let mut restored = match Vehicle::from_json(&contents) {
        Ok(restored) => restored,
        Err(err) => panic!("restore failed: {}", err),
    };

    let config = test_config();
    let terrain = flat_ground();
    let input = |_| ControlInput::from_keys([ControlKey::Decelerate]);
    let original_events = run_ticks(&mut vehicle, &vehicle_type, &config, &terrain, 50, input);
    let restored_events = run_ticks(&mut restored, &vehicle_type, &config, &terrain, 50, input);

    assert_eq!(restored_events, original_events);
    assert_eq!(restored, vehicle);
}

#[test]
fn test_invalid_records_are_rejected() {
    let (_, vehicle) = worn_buggy();
    let Ok(mut record) = vehicle.to_record() else {
        panic!("record failed");
    };
    record["state"]["throttle"] = serde_json::json!(3.5);
    assert!(matches!(
        Vehicle::from_record(record),
        Err(VehicleError::InvalidRecord(_))
    ));

    assert!(matches!(
        Vehicle::from_json("{\"id\": 7}"),
        Err(VehicleError::Record(_))
    ));
}

#[test]
fn test_config_file_round_trip() {
    let mut config = DriveableConfig::default();
    config.vehicle_lifetime_seconds = 300;
    config.network.interpolation_ticks = 3;
    config.fuel.global_fuel_use_multiplier = 0.5;

    let file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => panic!("tempfile: {}", err),
    };
    assert!(config.save(file.path()).is_ok());
    let loaded = match DriveableConfig::load(file.path()) {
        Ok(loaded) => loaded,
        Err(err) => panic!("load failed: {}", err),
    };
    assert_eq!(loaded, config);
    assert_eq!(loaded.lifetime_ticks(), Some(6000));
}

#[test]
fn test_vehicle_type_from_yaml_file() {
    let yaml = r#"
name: Tug
kind: Ground
engine_rating: 0.8
max_throttle: 1.2
max_negative_throttle: 0.3
propellers: [CoreWheel]
support_points:
  - [1.0, -0.4, -0.6]
  - [1.0, -0.4, 0.6]
  - [-1.0, -0.4, 0.0]
fuel_kind: Battery
fuel_capacity: 20.0
part_health:
  Core: 80
  CoreWheel: 30
"#;
    let mut file = match NamedTempFile::new() {
        Ok(file) => file,
        Err(err) => panic!("tempfile: {}", err),
    };
    assert!(file.write_all(yaml.as_bytes()).is_ok());

    let vehicle_type = match VehicleType::load(file.path()) {
        Ok(vehicle_type) => vehicle_type,
        Err(err) => panic!("load failed: {}", err),
    };
    assert_eq!(vehicle_type.name, "Tug");
    assert_eq!(vehicle_type.support_points.len(), 3);
    assert_eq!(vehicle_type.support_points[2], Vector3::new(-1.0, -0.4, 0.0));

    let vehicle = Vehicle::spawn(VehicleId::new(), &vehicle_type, Vector3::zeros(), 0.0);
    assert_eq!(vehicle.fuel.capacity(), 20.0 * 600.0);

    let broken = yaml.replace("engine_rating: 0.8", "engine_rating: -2.0");
    assert!(matches!(
        VehicleType::from_yaml(&broken),
        Err(ConfigError::Validation(_))
    ));
}
