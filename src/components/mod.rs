pub mod camera;
pub mod config;
pub mod events;
pub mod fuel;
pub mod input;
pub mod network;
pub mod orientation;
pub mod parts;
pub mod vehicle;

pub use camera::ChaseCamera;
pub use config::{ControlModifiers, RawVehicleType, VehicleKind, VehicleType};
pub use events::{SoundCue, VehicleEvent};
pub use fuel::{FuelKind, FuelSource};
pub use input::{ControlInput, ControlKey};
pub use network::{NetworkReconciler, ReconcilerRole, VehicleSnapshot};
pub use orientation::OrientationFrame;
pub use parts::{DamageOutcome, PartHealthModel, PartId, PartState};
pub use vehicle::{
    ControlSurfaces, FlightMode, SupportPoint, Toggles, Vehicle, VehicleId, VehicleState,
};
