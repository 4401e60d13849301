use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// The world a vehicle moves through, reduced to what the suspension needs: an optional
/// flat ground plane that blocks downward motion and an optional water surface.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub ground_height: Option<f64>,
    pub water_level: Option<f64>,
}

impl Terrain {
    /// No ground, no water.
    pub fn open_sky() -> Self {
        Self::default()
    }

    pub fn flat(ground_height: f64) -> Self {
        Self {
            ground_height: Some(ground_height),
            water_level: None,
        }
    }

    pub fn with_water(mut self, level: f64) -> Self {
        self.water_level = Some(level);
        self
    }

    /// Motion actually achievable from `from` when trying to move by `delta`.
    pub fn resolve_motion(&self, from: &Vector3<f64>, delta: &Vector3<f64>) -> Vector3<f64> {
        let mut resolved = *delta;
        if let Some(ground) = self.ground_height {
            // Something already embedded in the ground may rise but never sink further.
            let floor = (ground - from.y).min(0.0);
            resolved.y = resolved.y.max(floor);
        }
        resolved
    }

    pub fn in_liquid(&self, position: &Vector3<f64>) -> bool {
        self.water_level.is_some_and(|level| position.y < level)
    }
}
