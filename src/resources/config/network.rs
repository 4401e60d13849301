use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Ticks an observer takes to glide onto a freshly received sample.
    pub interpolation_ticks: u32,
    /// Position error beyond which a predicting client snaps to the authoritative sample.
    pub resync_distance: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            interpolation_ticks: 5,
            resync_distance: 4.0,
        }
    }
}
