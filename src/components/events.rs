use serde::{Deserialize, Serialize};

use crate::components::PartId;

/// Which propulsion sound a vehicle wants played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Startup,
    Engine,
}

/// Everything a tick reports to the outside world. The core never performs audio or network
/// I/O itself; collaborators consume these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VehicleEvent {
    ControllerChanged { controlled: bool },
    PartDestroyed(PartId),
    PartRepaired(PartId),
    FuelDepleted,
    StartPropulsionSound(SoundCue),
    StopPropulsionSound,
    /// A support point tried to move further than the per-tick cap in one step.
    SupportPointClamped { slot: usize, attempted: f64 },
    /// The core part died; the vehicle is now terminal.
    VehicleDestroyed,
    /// Idle lifetime exceeded with no controller.
    Despawned,
    /// A predicting context snapped back onto the authoritative state.
    Resynced { error: f64 },
    /// An inbound snapshot carried a NaN or infinite value and was dropped.
    SnapshotRejected { tick: u64 },
}
