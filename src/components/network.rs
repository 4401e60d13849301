use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{
    ControlInput, ControlSurfaces, FlightMode, OrientationFrame, Toggles, Vehicle, VehicleId,
};

/// State one context sends to another. Only what the receiver needs to reproduce motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    /// Sender's tick counter when the snapshot was taken.
    pub tick: u64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: OrientationFrame,
    pub throttle: f64,
    pub surfaces: ControlSurfaces,
    pub toggles: Toggles,
    pub mode: FlightMode,
    pub has_controller: bool,
    /// Input the sender applied on that tick, replayed by observers that lose contact.
    pub input: ControlInput,
}

impl VehicleSnapshot {
    pub fn capture(vehicle: &Vehicle, tick: u64, input: &ControlInput) -> Self {
        let state = &vehicle.state;
        Self {
            id: vehicle.id,
            tick,
            position: state.position,
            velocity: state.velocity,
            orientation: state.orientation,
            throttle: state.throttle,
            surfaces: state.surfaces,
            toggles: state.toggles,
            mode: state.mode,
            has_controller: state.has_controller,
            input: input.clone(),
        }
    }

    /// Whether every number a receiver would adopt or replay is finite.
    pub fn is_finite(&self) -> bool {
        let surfaces = &self.surfaces;
        self.position.iter().all(|value| value.is_finite())
            && self.velocity.iter().all(|value| value.is_finite())
            && self.orientation.rotation().coords.iter().all(|value| value.is_finite())
            && self.throttle.is_finite()
            && [surfaces.yaw, surfaces.pitch_left, surfaces.pitch_right]
                .iter()
                .all(|value| value.is_finite())
            && self.input.mouse_delta.0.is_finite()
            && self.input.mouse_delta.1.is_finite()
    }

    /// Whether `self` differs from `other` in anything an observer would see.
    pub fn differs_visibly(&self, other: &VehicleSnapshot) -> bool {
        self.position != other.position
            || self.orientation != other.orientation
            || self.throttle != other.throttle
            || self.toggles != other.toggles
            || self.mode != other.mode
    }
}

/// The role a context holds for one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcilerRole {
    /// Source of truth: runs the dynamics and publishes its state.
    Authoritative { last_sent: Option<VehicleSnapshot> },
    /// Controlling client: runs the dynamics locally and publishes its state, snapping back
    /// onto authoritative corrections only when they disagree too much.
    Predicting { last_sent: Option<VehicleSnapshot> },
    /// Non-controlling client: glides toward the latest received sample over `ticker` ticks,
    /// then keeps simulating on the last known input until the next sample.
    Observing {
        ticker: u32,
        target: Option<VehicleSnapshot>,
        last_input: ControlInput,
    },
}

/// Per-vehicle network role plus the tick counter stamped on outgoing snapshots.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NetworkReconciler {
    pub role: ReconcilerRole,
    pub tick: u64,
}

impl NetworkReconciler {
    pub fn authoritative() -> Self {
        Self {
            role: ReconcilerRole::Authoritative { last_sent: None },
            tick: 0,
        }
    }

    pub fn predicting() -> Self {
        Self {
            role: ReconcilerRole::Predicting { last_sent: None },
            tick: 0,
        }
    }

    pub fn observing() -> Self {
        Self {
            role: ReconcilerRole::Observing {
                ticker: 0,
                target: None,
                last_input: ControlInput::default(),
            },
            tick: 0,
        }
    }

    pub fn is_authoritative(&self) -> bool {
        matches!(self.role, ReconcilerRole::Authoritative { .. })
    }

    pub fn is_predicting(&self) -> bool {
        matches!(self.role, ReconcilerRole::Predicting { .. })
    }

    pub fn is_observing(&self) -> bool {
        matches!(self.role, ReconcilerRole::Observing { .. })
    }
}

impl Default for NetworkReconciler {
    fn default() -> Self {
        Self::authoritative()
    }
}
