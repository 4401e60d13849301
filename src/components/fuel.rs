use serde::{Deserialize, Serialize};

use crate::resources::FuelConfig;
use crate::utils::{ENERGY_PER_FUEL_UNIT, ENERGY_STORAGE_PER_FUEL_UNIT};

/// Which kind of reservoir a vehicle type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FuelKind {
    #[default]
    Liquid,
    Battery,
}

/// Energy reservoir of a vehicle.
///
/// Consumption is always requested in abstract fuel units. A battery stores whole energy
/// units and converts each fuel unit into [`ENERGY_PER_FUEL_UNIT`] of them, rounding up so an
/// integer store can never be over-drawn.
///
/// Every operation clamps instead of failing: fuel bookkeeping never aborts a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuelSource {
    Liquid { level: f64, capacity: f64 },
    Battery { energy: u64, max_energy: u64 },
}

impl FuelSource {
    /// An empty liquid tank.
    pub fn liquid(capacity: f64) -> Self {
        FuelSource::Liquid {
            level: 0.0,
            capacity: sanitize(capacity),
        }
    }

    /// An empty battery holding at most `max_energy` energy units.
    pub fn battery(max_energy: u64) -> Self {
        FuelSource::Battery {
            energy: 0,
            max_energy,
        }
    }

    /// An empty battery sized from a nominal fuel capacity.
    pub fn battery_from_fuel(fuel_capacity: f64) -> Self {
        Self::battery((sanitize(fuel_capacity) * ENERGY_STORAGE_PER_FUEL_UNIT) as u64)
    }

    /// An empty reservoir of the given kind sized from a nominal fuel capacity.
    pub fn for_kind(kind: FuelKind, fuel_capacity: f64) -> Self {
        match kind {
            FuelKind::Liquid => Self::liquid(fuel_capacity),
            FuelKind::Battery => Self::battery_from_fuel(fuel_capacity),
        }
    }

    pub fn kind(&self) -> FuelKind {
        match self {
            FuelSource::Liquid { .. } => FuelKind::Liquid,
            FuelSource::Battery { .. } => FuelKind::Battery,
        }
    }

    pub fn is_electric(&self) -> bool {
        matches!(self, FuelSource::Battery { .. })
    }

    /// Current content in native units (fuel units or energy units).
    pub fn level(&self) -> f64 {
        match *self {
            FuelSource::Liquid { level, .. } => level,
            FuelSource::Battery { energy, .. } => energy as f64,
        }
    }

    /// Capacity in native units.
    pub fn capacity(&self) -> f64 {
        match *self {
            FuelSource::Liquid { capacity, .. } => capacity,
            FuelSource::Battery { max_energy, .. } => max_energy as f64,
        }
    }

    pub fn fill_fraction(&self) -> f64 {
        let capacity = self.capacity();
        if capacity > 0.0 {
            self.level() / capacity
        } else {
            0.0
        }
    }

    /// Offers `amount` native units. Accepts at most the configured per-tick transfer rate
    /// and never more than the free space; negative offers are treated as zero. With
    /// `simulate` the level is left untouched and only the would-be amount is reported.
    pub fn receive(&mut self, amount: f64, simulate: bool, config: &FuelConfig) -> f64 {
        let amount = sanitize(amount);
        match self {
            FuelSource::Liquid { level, capacity } => {
                let accepted = amount
                    .min(config.fuel_transfer_rate)
                    .clamp(0.0, (*capacity - *level).max(0.0));
                if !simulate {
                    *level += accepted;
                }
                accepted
            }
            FuelSource::Battery { energy, max_energy } => {
                let offered = amount.min(config.energy_transfer_rate as f64) as u64;
                let accepted = offered.min(max_energy.saturating_sub(*energy));
                if !simulate {
                    *energy += accepted;
                }
                accepted as f64
            }
        }
    }

    /// Whether anything is left at all.
    pub fn has_fuel(&self) -> bool {
        match *self {
            FuelSource::Liquid { level, .. } => level > 0.0,
            FuelSource::Battery { energy, .. } => energy > 0,
        }
    }

    /// Whether the reservoir can cover `required` fuel units this tick.
    pub fn has_fuel_for(&self, required: f64) -> bool {
        let required = sanitize(required);
        match *self {
            FuelSource::Liquid { level, .. } => level - required >= 0.0,
            FuelSource::Battery { energy, .. } => energy as f64 - energy_draw(required) >= 0.0,
        }
    }

    /// Burns `amount` fuel units, saturating at empty.
    pub fn consume(&mut self, amount: f64) {
        let amount = sanitize(amount);
        match self {
            FuelSource::Liquid { level, .. } => *level = (*level - amount).max(0.0),
            FuelSource::Battery { energy, .. } => {
                let draw = energy_draw(amount);
                *energy = if draw >= *energy as f64 {
                    0
                } else {
                    *energy - draw as u64
                };
            }
        }
    }

    /// Administrative fill used by spawn paths, `fraction` clamped to `[0, 1]`.
    pub fn set_fill_percentage(&mut self, fraction: f64) {
        let fraction = sanitize(fraction).min(1.0);
        match self {
            FuelSource::Liquid { level, capacity } => *level = *capacity * fraction,
            FuelSource::Battery { energy, max_energy } => {
                *energy = (*max_energy as f64 * fraction) as u64
            }
        }
    }

    /// Administrative fill used when restoring persisted state, clamped to capacity.
    pub fn set_fill_amount(&mut self, amount: f64) {
        let amount = sanitize(amount);
        match self {
            FuelSource::Liquid { level, capacity } => *level = amount.min(*capacity),
            FuelSource::Battery { energy, max_energy } => {
                *energy = (amount.min(*max_energy as f64)) as u64
            }
        }
    }
}

/// Energy units a battery must give up for `fuel` fuel units.
fn energy_draw(fuel: f64) -> f64 {
    (fuel * ENERGY_PER_FUEL_UNIT).ceil()
}

/// Negative and NaN inputs count as zero.
fn sanitize(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}
