use driveable::components::{Vehicle, VehicleId, VehicleType};
use nalgebra::Vector3;

/// Biplane with a frugal engine, so a long flight never runs dry.
pub fn long_range_biplane() -> VehicleType {
    VehicleType {
        fuel_consumption: 0.1,
        ..VehicleType::biplane()
    }
}

/// A full-tank vehicle with a pilot aboard.
pub fn piloted(vehicle_type: &VehicleType, position: Vector3<f64>) -> Vehicle {
    let mut vehicle = Vehicle::spawn(VehicleId::new(), vehicle_type, position, 0.0).fueled(1.0);
    vehicle.set_controller(true);
    vehicle
}

/// A vehicle at rest with its wheels touching the ground plane at y = 0.
pub fn parked(vehicle_type: &VehicleType) -> Vehicle {
    let wheel_drop = vehicle_type
        .support_points
        .iter()
        .map(|offset| offset.y)
        .fold(0.0, f64::min);
    Vehicle::spawn(VehicleId::new(), vehicle_type, Vector3::new(0.0, -wheel_drop, 0.0), 0.0)
}
