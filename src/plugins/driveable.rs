use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{ControlInput, NetworkReconciler, Vehicle, VehicleId, VehicleType};
use crate::plugins::{
    ControllerRequest, DamageRequest, DriveableEvent, InboundSnapshot, OutboundSnapshot,
    RepairRequest,
};
use crate::resources::{DriveableConfig, Terrain};
use crate::systems::{
    chase_camera_system, despawn_dead_vehicles_system, inbound_snapshot_system,
    vehicle_request_system, vehicle_tick_system,
};

/// Order of the per-tick work.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DriveableSet {
    /// Inbound snapshots and external requests.
    Network,
    /// One reconciled tick per vehicle.
    Simulation,
    Camera,
    /// Dead vehicles leave the world.
    Cleanup,
}

/// Everything one driveable entity needs.
#[derive(Bundle)]
pub struct DriveableBundle {
    pub vehicle: Vehicle,
    pub vehicle_type: VehicleType,
    pub reconciler: NetworkReconciler,
    pub input: ControlInput,
    pub name: Name,
}

impl DriveableBundle {
    pub fn new(
        vehicle_type: VehicleType,
        position: Vector3<f64>,
        yaw: f64,
        reconciler: NetworkReconciler,
    ) -> Self {
        let vehicle = Vehicle::spawn(VehicleId::new(), &vehicle_type, position, yaw);
        Self::from_vehicle(vehicle, vehicle_type, reconciler)
    }

    /// Wraps an existing vehicle, e.g. one restored from a record or mirrored from a server.
    pub fn from_vehicle(vehicle: Vehicle, vehicle_type: VehicleType, reconciler: NetworkReconciler) -> Self {
        Self {
            name: Name::new(format!("{} {}", vehicle_type.name, vehicle.id)),
            vehicle,
            vehicle_type,
            reconciler,
            input: ControlInput::default(),
        }
    }
}

/// Runs every driveable on the fixed timestep:
/// - inbound snapshots and damage/repair/controller requests,
/// - the reconciled vehicle tick,
/// - chase cameras,
/// - removal of dead vehicles.
pub struct DriveablePlugin {
    config: DriveableConfig,
    terrain: Terrain,
}

impl DriveablePlugin {
    pub fn new(config: DriveableConfig, terrain: Terrain) -> Self {
        Self { config, terrain }
    }
}

impl Default for DriveablePlugin {
    fn default() -> Self {
        Self::new(DriveableConfig::default(), Terrain::default())
    }
}

impl Plugin for DriveablePlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(error) => {
                warn!("Driveable config rejected, using defaults: {}", error);
                DriveableConfig::default()
            }
        };
        let tick_rate = config.tick_rate;

        app.add_event::<DriveableEvent>()
            .add_event::<OutboundSnapshot>()
            .add_event::<InboundSnapshot>()
            .add_event::<DamageRequest>()
            .add_event::<RepairRequest>()
            .add_event::<ControllerRequest>()
            .insert_resource(config)
            .insert_resource(self.terrain)
            .configure_sets(
                FixedUpdate,
                (
                    DriveableSet::Network,
                    DriveableSet::Simulation,
                    DriveableSet::Camera,
                    DriveableSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    (inbound_snapshot_system, vehicle_request_system)
                        .chain()
                        .in_set(DriveableSet::Network),
                    vehicle_tick_system.in_set(DriveableSet::Simulation),
                    chase_camera_system.in_set(DriveableSet::Camera),
                    despawn_dead_vehicles_system.in_set(DriveableSet::Cleanup),
                ),
            );

        app.insert_resource(Time::<Fixed>::from_hz(tick_rate));
        info!("Driveable simulation running at {} Hz", tick_rate);
    }
}
