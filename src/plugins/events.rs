use bevy::prelude::*;

use crate::components::{PartId, VehicleEvent, VehicleSnapshot};

/// A [`VehicleEvent`] raised by the vehicle on `entity`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DriveableEvent {
    pub entity: Entity,
    pub event: VehicleEvent,
}

/// State this context wants delivered to the other contexts simulating the same vehicle.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct OutboundSnapshot {
    pub entity: Entity,
    pub snapshot: VehicleSnapshot,
}

/// State received from another context. Routed by [`VehicleSnapshot::id`].
#[derive(Event, Debug, Clone, PartialEq)]
pub struct InboundSnapshot {
    pub snapshot: VehicleSnapshot,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRequest {
    pub entity: Entity,
    pub part: PartId,
    pub amount: u32,
}

/// Repair of one part whose cost the caller has already settled.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairRequest {
    pub entity: Entity,
    pub part: PartId,
}

/// A controller entered (`controlled`) or left the vehicle.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerRequest {
    pub entity: Entity,
    pub controlled: bool,
}
