use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::components::{FlightMode, FuelKind, PartId};

/// What a vehicle type is built as. `Vtol` types switch between fixed-wing and rotary-wing
/// flight with the wing toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    Plane,
    Heli,
    Vtol,
    Ground,
}

impl VehicleKind {
    /// Flight mode a freshly spawned vehicle starts in.
    pub fn initial_mode(self) -> FlightMode {
        match self {
            VehicleKind::Plane | VehicleKind::Vtol => FlightMode::FixedWing,
            VehicleKind::Heli => FlightMode::RotaryWing,
            VehicleKind::Ground => FlightMode::Ground,
        }
    }
}

/// Asymmetric control authority per direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlModifiers {
    pub turn_left: f64,
    pub turn_right: f64,
    pub look_up: f64,
    pub look_down: f64,
    pub roll_left: f64,
    pub roll_right: f64,
}

impl Default for ControlModifiers {
    fn default() -> Self {
        Self {
            turn_left: 1.0,
            turn_right: 1.0,
            look_up: 1.0,
            look_down: 1.0,
            roll_left: 1.0,
            roll_right: 1.0,
        }
    }
}

/// Immutable per-type table every vehicle of that type shares.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub name: String,
    pub kind: VehicleKind,
    /// Engine rating; 1.0 on a rotorcraft means exact hover at full throttle.
    pub engine_rating: f64,
    pub max_throttle: f64,
    /// Deepest reverse throttle, 0 when the type cannot reverse.
    pub max_negative_throttle: f64,
    /// Fuel units burnt per tick at full throttle.
    pub fuel_consumption: f64,
    pub drag: f64,
    pub modifiers: ControlModifiers,
    /// Parts driving fixed-wing (or ground) thrust.
    pub propellers: Vec<PartId>,
    /// Parts driving rotary-wing thrust.
    pub rotors: Vec<PartId>,
    /// Rest-pose offsets of the support points in vehicle-local space.
    pub support_points: Vec<Vector3<f64>>,
    pub spring_strength: f64,
    pub fuel_kind: FuelKind,
    pub fuel_capacity: f64,
    pub part_health: BTreeMap<PartId, u32>,
    pub has_door: bool,
    pub has_wing: bool,
    pub float_on_water: bool,
    pub buoyancy: f64,
    /// Horizontal velocity multiplier while braking.
    pub brake_factor: f64,
    pub resting_pitch: f64,
    pub start_sound_length: u32,
    pub engine_sound_length: u32,
    pub camera_offset: Vector3<f64>,
}

impl VehicleType {
    /// Thrust parts for the given flight mode.
    pub fn thrust_parts(&self, mode: FlightMode) -> &[PartId] {
        match mode {
            FlightMode::RotaryWing => &self.rotors,
            FlightMode::FixedWing | FlightMode::Ground => &self.propellers,
        }
    }

    /// A light single-engine propeller plane on a tricycle of wheels.
    pub fn biplane() -> Self {
        Self {
            name: "Biplane".to_string(),
            kind: VehicleKind::Plane,
            engine_rating: 1.0,
            max_throttle: 2.0,
            max_negative_throttle: 0.0,
            fuel_consumption: 0.5,
            drag: 1.0,
            modifiers: ControlModifiers::default(),
            propellers: vec![PartId::Nose],
            rotors: vec![],
            support_points: vec![
                Vector3::new(1.5, -1.0, 0.0),
                Vector3::new(-2.0, -1.0, -1.5),
                Vector3::new(-2.0, -1.0, 1.5),
            ],
            spring_strength: 0.5,
            fuel_kind: FuelKind::Liquid,
            fuel_capacity: 100.0,
            part_health: default_health(&[
                (PartId::Core, 200),
                (PartId::Nose, 100),
                (PartId::Tail, 100),
                (PartId::LeftWing, 100),
                (PartId::RightWing, 100),
                (PartId::CoreWheel, 50),
                (PartId::LeftWingWheel, 50),
                (PartId::RightWingWheel, 50),
            ]),
            has_door: false,
            has_wing: false,
            float_on_water: false,
            buoyancy: 0.0,
            brake_factor: 0.9,
            resting_pitch: 0.0,
            start_sound_length: 20,
            engine_sound_length: 40,
            camera_offset: Vector3::new(-10.0, 2.0, 0.0),
        }
    }

    /// A single-rotor helicopter on skids.
    pub fn helicopter() -> Self {
        Self {
            name: "Helicopter".to_string(),
            kind: VehicleKind::Heli,
            engine_rating: 1.25,
            max_throttle: 1.0,
            propellers: vec![],
            rotors: vec![PartId::Blades],
            support_points: vec![
                Vector3::new(1.0, -1.5, -1.0),
                Vector3::new(1.0, -1.5, 1.0),
                Vector3::new(-1.0, -1.5, -1.0),
                Vector3::new(-1.0, -1.5, 1.0),
            ],
            part_health: default_health(&[
                (PartId::Core, 250),
                (PartId::Tail, 100),
                (PartId::Blades, 120),
            ]),
            camera_offset: Vector3::new(-12.0, 3.0, 0.0),
            ..Self::biplane()
        }
    }

    /// A jet that can hover on lift fans as well as fly on its wings.
    pub fn vtol_jet() -> Self {
        Self {
            name: "VTOL Jet".to_string(),
            kind: VehicleKind::Vtol,
            engine_rating: 1.5,
            max_throttle: 3.0,
            fuel_consumption: 1.0,
            propellers: vec![PartId::Core],
            rotors: vec![PartId::LeftWing, PartId::RightWing],
            has_wing: true,
            has_door: true,
            ..Self::biplane()
        }
    }

    /// A battery-powered four-wheel buggy.
    pub fn buggy() -> Self {
        Self {
            name: "Buggy".to_string(),
            kind: VehicleKind::Ground,
            engine_rating: 1.0,
            max_throttle: 1.5,
            max_negative_throttle: 0.5,
            fuel_consumption: 0.1,
            drag: 2.0,
            propellers: vec![
                PartId::CoreWheel,
                PartId::LeftWingWheel,
                PartId::RightWingWheel,
                PartId::TailWheel,
            ],
            rotors: vec![],
            support_points: vec![
                Vector3::new(1.2, -0.5, -0.8),
                Vector3::new(1.2, -0.5, 0.8),
                Vector3::new(-1.2, -0.5, -0.8),
                Vector3::new(-1.2, -0.5, 0.8),
            ],
            fuel_kind: FuelKind::Battery,
            fuel_capacity: 50.0,
            part_health: default_health(&[
                (PartId::Core, 150),
                (PartId::CoreWheel, 40),
                (PartId::LeftWingWheel, 40),
                (PartId::RightWingWheel, 40),
                (PartId::TailWheel, 40),
            ]),
            brake_factor: 0.8,
            camera_offset: Vector3::new(-6.0, 2.0, 0.0),
            ..Self::biplane()
        }
    }
}

fn default_health(parts: &[(PartId, u32)]) -> BTreeMap<PartId, u32> {
    parts.iter().copied().collect()
}
