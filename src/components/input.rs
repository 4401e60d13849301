use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Discrete controls a vehicle understands. Held keys are reported every tick they are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKey {
    Accelerate,
    Decelerate,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollLeft,
    RollRight,
    ToggleGear,
    ToggleDoor,
    ToggleWing,
    /// Levels pitch and roll, keeps the heading.
    Trim,
    Brake,
}

/// Per-tick control input for one vehicle, cleared once the tick has consumed it.
///
/// Out-of-range values are never an error: the tick clamps whatever it is given.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub keys: Vec<ControlKey>,
    /// Mouse movement since the last tick as `(dx, dy)` counts in screen coordinates, used
    /// only when `mouse_control` is enabled. `dx > 0` is a move right and rolls right;
    /// `dy > 0` is a move down (stick pulled back) and pitches up.
    pub mouse_delta: (f64, f64),
    pub mouse_control: bool,
}

impl ControlInput {
    pub fn from_keys(keys: impl IntoIterator<Item = ControlKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_mouse(mut self, dx: f64, dy: f64) -> Self {
        self.mouse_delta = (dx, dy);
        self.mouse_control = true;
        self
    }

    pub fn pressed(&self, key: ControlKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && (!self.mouse_control || self.mouse_delta == (0.0, 0.0))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.mouse_delta = (0.0, 0.0);
    }
}
