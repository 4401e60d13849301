use bevy::log::info;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::vehicle_type::{ControlModifiers, VehicleKind, VehicleType};
use crate::components::{FuelKind, PartId};
use crate::resources::ConfigError;

/// Vehicle type as written in a content file. Everything but the name, kind and engine is
/// optional and falls back to the values of a plain propeller plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVehicleType {
    pub name: String,
    pub kind: VehicleKind,
    pub engine_rating: f64,
    #[serde(default = "default_max_throttle")]
    pub max_throttle: f64,
    #[serde(default)]
    pub max_negative_throttle: f64,
    #[serde(default = "default_fuel_consumption")]
    pub fuel_consumption: f64,
    #[serde(default = "default_drag")]
    pub drag: f64,
    #[serde(default)]
    pub modifiers: ControlModifiers,
    #[serde(default)]
    pub propellers: Vec<PartId>,
    #[serde(default)]
    pub rotors: Vec<PartId>,
    #[serde(default)]
    pub support_points: Vec<[f64; 3]>,
    #[serde(default = "default_spring_strength")]
    pub spring_strength: f64,
    #[serde(default)]
    pub fuel_kind: FuelKind,
    #[serde(default = "default_fuel_capacity")]
    pub fuel_capacity: f64,
    #[serde(default)]
    pub part_health: BTreeMap<PartId, u32>,
    #[serde(default)]
    pub has_door: bool,
    #[serde(default)]
    pub has_wing: bool,
    #[serde(default)]
    pub float_on_water: bool,
    #[serde(default)]
    pub buoyancy: f64,
    #[serde(default = "default_brake_factor")]
    pub brake_factor: f64,
    #[serde(default)]
    pub resting_pitch: f64,
    #[serde(default = "default_sound_length")]
    pub start_sound_length: u32,
    #[serde(default = "default_sound_length")]
    pub engine_sound_length: u32,
    #[serde(default = "default_camera_offset")]
    pub camera_offset: [f64; 3],
}

fn default_max_throttle() -> f64 {
    1.0
}

fn default_fuel_consumption() -> f64 {
    1.0
}

fn default_drag() -> f64 {
    1.0
}

fn default_spring_strength() -> f64 {
    0.5
}

fn default_fuel_capacity() -> f64 {
    100.0
}

fn default_brake_factor() -> f64 {
    0.9
}

fn default_sound_length() -> u32 {
    20
}

fn default_camera_offset() -> [f64; 3] {
    [-10.0, 2.0, 0.0]
}

impl VehicleType {
    /// Reads and validates a vehicle type from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let vehicle_type = Self::from_yaml(&contents)?;
        info!(
            "Loaded vehicle type '{}' from {}",
            vehicle_type.name,
            path.as_ref().display()
        );
        Ok(vehicle_type)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawVehicleType = serde_yaml::from_str(contents)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawVehicleType) -> Result<Self, ConfigError> {
        if raw.name.trim().is_empty() {
            return Err(ConfigError::Validation("vehicle type has no name".into()));
        }
        for (field, value) in [
            ("engine_rating", raw.engine_rating),
            ("max_throttle", raw.max_throttle),
            ("max_negative_throttle", raw.max_negative_throttle),
            ("fuel_consumption", raw.fuel_consumption),
            ("drag", raw.drag),
            ("fuel_capacity", raw.fuel_capacity),
            ("buoyancy", raw.buoyancy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{}: {} must be a non-negative number, got {}",
                    raw.name, field, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&raw.spring_strength) {
            return Err(ConfigError::Validation(format!(
                "{}: spring_strength must lie in [0, 1], got {}",
                raw.name, raw.spring_strength
            )));
        }
        if !(0.0..=1.0).contains(&raw.brake_factor) {
            return Err(ConfigError::Validation(format!(
                "{}: brake_factor must lie in [0, 1], got {}",
                raw.name, raw.brake_factor
            )));
        }
        if raw.part_health.values().any(|&health| health == 0) {
            return Err(ConfigError::Validation(format!(
                "{}: part health must be positive",
                raw.name
            )));
        }

        let mut part_health = raw.part_health;
        part_health.entry(PartId::Core).or_insert(100);

        Ok(VehicleType {
            name: raw.name,
            kind: raw.kind,
            engine_rating: raw.engine_rating,
            max_throttle: raw.max_throttle,
            max_negative_throttle: raw.max_negative_throttle,
            fuel_consumption: raw.fuel_consumption,
            drag: raw.drag,
            modifiers: raw.modifiers,
            propellers: raw.propellers,
            rotors: raw.rotors,
            support_points: raw
                .support_points
                .iter()
                .map(|&[x, y, z]| Vector3::new(x, y, z))
                .collect(),
            spring_strength: raw.spring_strength,
            fuel_kind: raw.fuel_kind,
            fuel_capacity: raw.fuel_capacity,
            part_health,
            has_door: raw.has_door,
            has_wing: raw.has_wing,
            float_on_water: raw.float_on_water,
            buoyancy: raw.buoyancy,
            brake_factor: raw.brake_factor,
            resting_pitch: raw.resting_pitch,
            start_sound_length: raw.start_sound_length,
            engine_sound_length: raw.engine_sound_length,
            camera_offset: Vector3::from(raw.camera_offset),
        })
    }
}
