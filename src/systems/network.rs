use bevy::prelude::*;
use nalgebra::Vector3;

use super::tick::{tick_vehicle, TickContext};
use crate::components::{
    ControlInput, NetworkReconciler, OrientationFrame, ReconcilerRole, Vehicle, VehicleEvent,
    VehicleKind, VehicleSnapshot, VehicleType,
};
use crate::plugins::{DriveableEvent, InboundSnapshot};
use crate::resources::{DriveableConfig, NetworkConfig, Terrain};
use crate::utils::{lerp, VECTOR_EPSILON};

/// What one reconciled tick produced: events for local consumers and, when the visible
/// state changed, a snapshot to publish.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
    pub events: Vec<VehicleEvent>,
    pub outbound: Option<VehicleSnapshot>,
}

impl NetworkReconciler {
    /// Local control starts: an observer becomes a predictor. Returns whether the role changed.
    pub fn begin_control(&mut self) -> bool {
        if !self.is_observing() {
            return false;
        }
        debug!("Reconciler: observing -> predicting");
        self.role = ReconcilerRole::Predicting { last_sent: None };
        true
    }

    /// Local control ends: a predictor goes back to observing.
    pub fn end_control(&mut self) -> bool {
        if !self.is_predicting() {
            return false;
        }
        debug!("Reconciler: predicting -> observing");
        self.role = ReconcilerRole::Observing {
            ticker: 0,
            target: None,
            last_input: ControlInput::default(),
        };
        true
    }

    /// Applies a snapshot that arrived from another context. Snapshots for other vehicles
    /// are ignored, snapshots holding non-finite numbers are rejected whatever the role.
    pub fn receive(
        &mut self,
        vehicle: &mut Vehicle,
        vehicle_type: &VehicleType,
        snapshot: VehicleSnapshot,
        config: &NetworkConfig,
    ) -> Vec<VehicleEvent> {
        let mut events = Vec::new();
        if snapshot.id != vehicle.id {
            debug!("Snapshot for {} ignored by {}", snapshot.id, vehicle.id);
            return events;
        }
        if !snapshot.is_finite() {
            warn!("Non-finite snapshot {} for {} dropped", snapshot.tick, vehicle.id);
            events.push(VehicleEvent::SnapshotRejected {
                tick: snapshot.tick,
            });
            return events;
        }

        match &mut self.role {
            ReconcilerRole::Authoritative { .. } => {
                accept_controller_state(vehicle, vehicle_type, &snapshot);
            }
            ReconcilerRole::Predicting { .. } => {
                let error = (snapshot.position - vehicle.state.position).norm();
                if error > config.resync_distance {
                    debug!("Vehicle {} resynced, error {:.3}", vehicle.id, error);
                    adopt(vehicle, &snapshot);
                    events.push(VehicleEvent::Resynced { error });
                }
            }
            ReconcilerRole::Observing {
                ticker,
                target,
                last_input,
            } => {
                *last_input = snapshot.input.clone();
                *ticker = config.interpolation_ticks;
                if *ticker == 0 {
                    adopt(vehicle, &snapshot);
                    *target = None;
                } else {
                    *target = Some(snapshot);
                }
            }
        }
        events
    }

    /// Advances the vehicle one tick according to this context's role.
    pub fn tick(
        &mut self,
        vehicle: &mut Vehicle,
        vehicle_type: &VehicleType,
        input: &ControlInput,
        config: &DriveableConfig,
        terrain: &Terrain,
    ) -> ReconcileOutcome {
        self.tick += 1;
        let tick = self.tick;
        let mut outcome = ReconcileOutcome::default();

        match &mut self.role {
            ReconcilerRole::Authoritative { last_sent } => {
                let ctx = TickContext::authoritative(config, terrain);
                outcome.events = tick_vehicle(vehicle, vehicle_type, input, &ctx);
                outcome.outbound = publish_if_changed(last_sent, vehicle, tick, input);
            }
            ReconcilerRole::Predicting { last_sent } => {
                let ctx = TickContext::remote(config, terrain);
                outcome.events = tick_vehicle(vehicle, vehicle_type, input, &ctx);
                outcome.outbound = publish_if_changed(last_sent, vehicle, tick, input);
            }
            ReconcilerRole::Observing {
                ticker,
                target,
                last_input,
            } => {
                if *ticker > 0 {
                    if let Some(sample) = target.as_ref() {
                        glide(vehicle, sample, *ticker);
                    }
                    *ticker -= 1;
                    if *ticker == 0 {
                        if let Some(sample) = target.take() {
                            adopt(vehicle, &sample);
                        }
                    }
                } else {
                    let ctx = TickContext::remote(config, terrain);
                    outcome.events = tick_vehicle(vehicle, vehicle_type, last_input, &ctx);
                }
            }
        }
        outcome
    }
}

/// Dirty-flag send: a snapshot goes out only when it differs visibly from the last one sent.
fn publish_if_changed(
    last_sent: &mut Option<VehicleSnapshot>,
    vehicle: &Vehicle,
    tick: u64,
    input: &ControlInput,
) -> Option<VehicleSnapshot> {
    let snapshot = VehicleSnapshot::capture(vehicle, tick, input);
    let changed = last_sent
        .as_ref()
        .map_or(true, |previous| snapshot.differs_visibly(previous));
    if !changed {
        return None;
    }
    *last_sent = Some(snapshot.clone());
    Some(snapshot)
}

/// Moves `1 / ticker` of the remaining way toward `sample`, so the last step lands on it.
fn glide(vehicle: &mut Vehicle, sample: &VehicleSnapshot, ticker: u32) {
    let fraction = 1.0 / ticker as f64;
    let position = vehicle.state.position + (sample.position - vehicle.state.position) * fraction;
    move_to(vehicle, position);
    let state = &mut vehicle.state;
    state.velocity = sample.velocity;
    state.throttle = lerp(state.throttle, sample.throttle, fraction);

    let current = *state.orientation.rotation();
    let target = *sample.orientation.rotation();
    let rotation = current
        .try_slerp(&target, fraction, VECTOR_EPSILON)
        .unwrap_or(target);
    state.orientation = OrientationFrame::from_rotation(rotation);
}

/// Teleports the body, carrying the support points along so the suspension sees no jump.
fn move_to(vehicle: &mut Vehicle, position: Vector3<f64>) {
    let delta = position - vehicle.state.position;
    vehicle.state.previous_position = vehicle.state.position;
    vehicle.state.position = position;
    for point in vehicle.support_points.iter_mut() {
        point.position += delta;
    }
}

/// Takes over every replicated field of `sample`.
fn adopt(vehicle: &mut Vehicle, sample: &VehicleSnapshot) {
    move_to(vehicle, sample.position);
    let state = &mut vehicle.state;
    state.velocity = sample.velocity;
    state.orientation = sample.orientation;
    state.throttle = sample.throttle;
    state.surfaces = sample.surfaces;
    state.toggles = sample.toggles;
    state.mode = sample.mode;
    state.has_controller = sample.has_controller;
}

/// The authority takes the controlling client's motion, re-clamping what the client may
/// not set by itself.
fn accept_controller_state(vehicle: &mut Vehicle, vehicle_type: &VehicleType, sample: &VehicleSnapshot) {
    let floor = -vehicle_type.max_negative_throttle.clamp(0.0, 1.0);
    move_to(vehicle, sample.position);
    let state = &mut vehicle.state;
    state.velocity = sample.velocity;
    state.orientation = sample.orientation;
    state.throttle = sample.throttle.clamp(floor, 1.0);
    state.surfaces = sample.surfaces;
    state.toggles = sample.toggles;
    if vehicle_type.kind == VehicleKind::Vtol {
        state.mode = sample.mode;
    }
}

/// Routes received snapshots to the vehicle they name.
pub fn inbound_snapshot_system(
    mut inbound: EventReader<InboundSnapshot>,
    mut query: Query<(Entity, &mut Vehicle, &VehicleType, &mut NetworkReconciler)>,
    config: Res<DriveableConfig>,
    mut events: EventWriter<DriveableEvent>,
) {
    for InboundSnapshot { snapshot } in inbound.read() {
        let Some((entity, mut vehicle, vehicle_type, mut reconciler)) = query
            .iter_mut()
            .find(|(_, vehicle, _, _)| vehicle.id == snapshot.id)
        else {
            debug!("No vehicle {} for inbound snapshot", snapshot.id);
            continue;
        };
        for event in reconciler.receive(&mut vehicle, vehicle_type, snapshot.clone(), &config.network) {
            events.send(DriveableEvent { entity, event });
        }
    }
}
