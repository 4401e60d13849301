mod loader;
mod vehicle_type;

pub use loader::RawVehicleType;
pub use vehicle_type::{ControlModifiers, VehicleKind, VehicleType};
