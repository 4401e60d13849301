use serde::{Deserialize, Serialize};

/// Server-wide fuel rules. Passed explicitly into every fuel operation that needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Multiplies every vehicle's per-tick fuel use.
    pub global_fuel_use_multiplier: f64,
    /// Maximum liquid fuel accepted per tick.
    pub fuel_transfer_rate: f64,
    /// Maximum battery energy accepted per tick.
    pub energy_transfer_rate: u64,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            global_fuel_use_multiplier: 1.0,
            fuel_transfer_rate: 50.0,
            energy_transfer_rate: 2000,
        }
    }
}
