use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{fuel::FuelConfig, network::NetworkConfig, physics::FlightPhysicsConfig};
use crate::resources::ConfigError;
use crate::utils::TICKS_PER_SECOND;

/// Global, immutable simulation configuration shared by every vehicle.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveableConfig {
    /// Fixed simulation rate in Hz.
    pub tick_rate: f64,
    pub physics: FlightPhysicsConfig,
    pub fuel: FuelConfig,
    pub network: NetworkConfig,
    /// Seconds an uncontrolled vehicle survives before despawning. 0 disables despawning.
    pub vehicle_lifetime_seconds: u32,
}

impl Default for DriveableConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICKS_PER_SECOND,
            physics: FlightPhysicsConfig::default(),
            fuel: FuelConfig::default(),
            network: NetworkConfig::default(),
            vehicle_lifetime_seconds: 0,
        }
    }
}

impl DriveableConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::Validation(format!(
                "tick_rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if !(self.physics.speed_cap > 0.0) {
            return Err(ConfigError::Validation(
                "physics.speed_cap must be positive".to_string(),
            ));
        }
        if !(self.physics.support_point_step_cap > 0.0) {
            return Err(ConfigError::Validation(
                "physics.support_point_step_cap must be positive".to_string(),
            ));
        }
        if self.fuel.global_fuel_use_multiplier < 0.0 || self.fuel.fuel_transfer_rate < 0.0 {
            return Err(ConfigError::Validation(
                "fuel multipliers and rates must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Ticks an uncontrolled vehicle may idle before it despawns, `None` if it never does.
    pub fn lifetime_ticks(&self) -> Option<u64> {
        (self.vehicle_lifetime_seconds > 0)
            .then(|| (self.vehicle_lifetime_seconds as f64 * self.tick_rate).round() as u64)
    }
}
