pub mod config;
mod errors;
mod terrain;

pub use config::{DriveableConfig, FlightPhysicsConfig, FuelConfig, NetworkConfig};
pub use errors::{ConfigError, VehicleError};
pub use terrain::Terrain;
