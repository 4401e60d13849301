use bevy::log::{debug, info};
use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use crate::components::{
    DamageOutcome, FuelSource, OrientationFrame, PartHealthModel, PartId, VehicleEvent,
    VehicleType,
};
use crate::resources::VehicleError;

/// Identity of one vehicle, stable across every context that simulates or observes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub Uuid);

impl VehicleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which force model drives the vehicle this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightMode {
    #[default]
    FixedWing,
    RotaryWing,
    Ground,
}

/// Transient control-surface deflections in degrees.
///
/// Pitch is the mean of the two pitch flaps, roll half their difference (left above right
/// banks right).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlSurfaces {
    pub yaw: f64,
    pub pitch_left: f64,
    pub pitch_right: f64,
}

impl ControlSurfaces {
    pub fn pitch(&self) -> f64 {
        (self.pitch_left + self.pitch_right) / 2.0
    }

    pub fn roll(&self) -> f64 {
        (self.pitch_left - self.pitch_right) / 2.0
    }

    /// Returns every deflection part of the way to rest, then clamps to `±limit`.
    pub fn relax(&mut self, decay: f64, limit: f64) {
        for value in [&mut self.yaw, &mut self.pitch_left, &mut self.pitch_right] {
            *value = (*value * decay).clamp(-limit, limit);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggles {
    pub gear_down: bool,
    pub door_open: bool,
    pub wing_deployed: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            gear_down: true,
            door_open: false,
            wing_deployed: false,
        }
    }
}

/// A wheel or skid reconciled to the vehicle frame every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportPoint {
    /// Index of the rest-pose slot in the vehicle type.
    pub slot: usize,
    /// Rest offset in vehicle-local space.
    pub rest_offset: Vector3<f64>,
    pub position: Vector3<f64>,
    pub previous_position: Vector3<f64>,
}

impl SupportPoint {
    /// A support point sitting exactly at its rest pose.
    pub fn at_rest(slot: usize, rest_offset: Vector3<f64>, body: &Vector3<f64>, frame: &OrientationFrame) -> Self {
        let position = body + frame.find_local_vector_globally(&rest_offset);
        Self {
            slot,
            rest_offset,
            position,
            previous_position: position,
        }
    }
}

/// Mutable per-tick state, owned by exactly one simulating context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub position: Vector3<f64>,
    pub previous_position: Vector3<f64>,
    /// Units per tick.
    pub velocity: Vector3<f64>,
    pub orientation: OrientationFrame,
    pub throttle: f64,
    pub mode: FlightMode,
    pub surfaces: ControlSurfaces,
    /// Cleared after every tick unless the brake key is held again.
    pub brakes_engaged: bool,
    pub toggles: Toggles,
    /// Ticks until gear/door/wing may be toggled again.
    pub toggle_cooldown: u32,
    pub ticks_since_used: u64,
    pub has_controller: bool,
    /// Thrust without fuel and without burning any.
    pub unlimited_fuel: bool,
    pub dead: bool,
    /// Propeller animation angle in degrees.
    pub prop_angle: f64,
    pub sound_timer: u32,
    pub propulsion_sound: bool,
}

impl VehicleState {
    pub fn new(position: Vector3<f64>, orientation: OrientationFrame, mode: FlightMode) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vector3::zeros(),
            orientation,
            throttle: 0.0,
            mode,
            surfaces: ControlSurfaces::default(),
            brakes_engaged: false,
            toggles: Toggles::default(),
            toggle_cooldown: 0,
            ticks_since_used: 0,
            has_controller: false,
            unlimited_fuel: false,
            dead: false,
            prop_angle: 0.0,
            sound_timer: 0,
            propulsion_sound: false,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// One driveable: its per-tick state plus the part and fuel models that gate it.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub type_name: String,
    pub state: VehicleState,
    pub parts: PartHealthModel,
    pub fuel: FuelSource,
    pub support_points: Vec<SupportPoint>,
}

impl Vehicle {
    /// A fresh vehicle of `vehicle_type` at `position` facing `yaw`, with every part at full
    /// health and an empty reservoir.
    pub fn spawn(id: VehicleId, vehicle_type: &VehicleType, position: Vector3<f64>, yaw: f64) -> Self {
        let orientation = OrientationFrame::from_angles(yaw, vehicle_type.resting_pitch, 0.0);
        let support_points = vehicle_type
            .support_points
            .iter()
            .enumerate()
            .map(|(slot, offset)| SupportPoint::at_rest(slot, *offset, &position, &orientation))
            .collect();

        info!("Spawned {} '{}' at {:?}", vehicle_type.name, id, position);

        Self {
            id,
            type_name: vehicle_type.name.clone(),
            state: VehicleState::new(position, orientation, vehicle_type.kind.initial_mode()),
            parts: PartHealthModel::with_default_parts(vehicle_type.part_health.iter()),
            fuel: FuelSource::for_kind(vehicle_type.fuel_kind, vehicle_type.fuel_capacity),
            support_points,
        }
    }

    /// Same vehicle with its reservoir filled to `fraction`.
    pub fn fueled(mut self, fraction: f64) -> Self {
        self.fuel.set_fill_percentage(fraction);
        self
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.state.position
    }

    pub fn velocity(&self) -> &Vector3<f64> {
        &self.state.velocity
    }

    pub fn orientation(&self) -> &OrientationFrame {
        &self.state.orientation
    }

    pub fn throttle(&self) -> f64 {
        self.state.throttle
    }

    pub fn mode(&self) -> FlightMode {
        self.state.mode
    }

    pub fn toggles(&self) -> Toggles {
        self.state.toggles
    }

    pub fn is_dead(&self) -> bool {
        self.state.dead
    }

    /// Whether the engine may produce thrust this tick.
    pub fn can_thrust(&self) -> bool {
        self.state.unlimited_fuel || self.fuel.has_fuel()
    }

    /// Wheels are stowed, and cannot be hit, while the gear is up.
    pub fn can_hit_part(&self, part: PartId) -> bool {
        !(part.is_wheel() && !self.state.toggles.gear_down)
    }

    pub fn set_controller(&mut self, present: bool) -> Option<VehicleEvent> {
        if self.state.has_controller == present {
            return None;
        }
        self.state.has_controller = present;
        debug!("Vehicle {} controller present: {}", self.id, present);
        Some(VehicleEvent::ControllerChanged { controlled: present })
    }

    /// Applies external damage to a part. Losing the core part kills the vehicle.
    pub fn apply_damage(&mut self, part: PartId, amount: u32) -> Vec<VehicleEvent> {
        let mut events = Vec::new();
        if self.state.dead || !self.can_hit_part(part) {
            return events;
        }
        if self.parts.apply_damage(part, amount) == DamageOutcome::Destroyed {
            events.push(VehicleEvent::PartDestroyed(part));
            if part == PartId::Core {
                self.state.dead = true;
                info!("Vehicle {} destroyed", self.id);
                events.push(VehicleEvent::VehicleDestroyed);
            }
        }
        events
    }

    /// Partial repair of one part; cost is validated by the caller.
    pub fn repair(&mut self, part: PartId) -> bool {
        self.parts.repair(part)
    }

    /// The full persisted state as an opaque structured record.
    pub fn to_record(&self) -> Result<serde_json::Value, VehicleError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_record(record: serde_json::Value) -> Result<Self, VehicleError> {
        let vehicle: Vehicle = serde_json::from_value(record)?;
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn to_json(&self) -> Result<String, VehicleError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, VehicleError> {
        let vehicle: Vehicle = serde_json::from_str(json)?;
        vehicle.validate()?;
        Ok(vehicle)
    }

    fn validate(&self) -> Result<(), VehicleError> {
        let state = &self.state;
        let finite = |v: &Vector3<f64>| v.iter().all(|c| c.is_finite());
        if !finite(&state.position) || !finite(&state.previous_position) || !finite(&state.velocity) {
            return Err(VehicleError::InvalidRecord("non-finite position or velocity".into()));
        }
        if !(-1.0..=1.0).contains(&state.throttle) {
            return Err(VehicleError::InvalidRecord(format!(
                "throttle {} outside [-1, 1]",
                state.throttle
            )));
        }
        if self.fuel.level() < 0.0 || self.fuel.level() > self.fuel.capacity() {
            return Err(VehicleError::InvalidRecord(format!(
                "fuel level {} outside [0, {}]",
                self.fuel.level(),
                self.fuel.capacity()
            )));
        }
        for (part, part_state) in self.parts.iter() {
            if part_state.max_health == 0 || part_state.health > part_state.max_health {
                return Err(VehicleError::InvalidRecord(format!(
                    "{:?} health {}/{}",
                    part, part_state.health, part_state.max_health
                )));
            }
        }
        let mut slots = BTreeSet::new();
        if !self.support_points.iter().all(|point| slots.insert(point.slot)) {
            return Err(VehicleError::InvalidRecord("duplicate support point slot".into()));
        }
        Ok(())
    }
}
