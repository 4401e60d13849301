mod driveable;
mod events;

pub use driveable::{DriveableBundle, DriveablePlugin, DriveableSet};
pub use events::{
    ControllerRequest, DamageRequest, DriveableEvent, InboundSnapshot, OutboundSnapshot,
    RepairRequest,
};
