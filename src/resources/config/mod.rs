pub mod fuel;
pub mod network;
pub mod physics;
pub mod simulation;

pub use fuel::FuelConfig;
pub use network::NetworkConfig;
pub use physics::FlightPhysicsConfig;
pub use simulation::DriveableConfig;
