use serde::{Deserialize, Serialize};

use crate::utils::GRAVITY;

/// Tuning of the phenomenological flight model. Units are world units and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightPhysicsConfig {
    /// Downward acceleration per tick.
    pub gravity: f64,
    /// Any vehicle faster than this is uniformly rescaled back to it.
    pub speed_cap: f64,
    /// General multiplier on the quadratic drag term.
    pub drag_multiplier: f64,
    /// Flat velocity multiplier used instead of quadratic drag at low speed.
    pub static_drag: f64,
    /// Speed below which `static_drag` replaces the quadratic term.
    pub static_drag_threshold: f64,
    /// Share of speed lost at 180 degrees between velocity and heading.
    pub maneuver_drag: f64,
    /// Control sensitivity is `sensitivity_multiplier * sqrt(throttle) + sensitivity_offset`.
    pub sensitivity_multiplier: f64,
    pub sensitivity_offset: f64,
    /// Per-tick decay of control-surface deflection.
    pub control_surface_decay: f64,
    /// Deflection limit in degrees.
    pub control_surface_limit: f64,
    /// Horizontal speed below which brakes bite.
    pub brake_speed_threshold: f64,
    /// Largest distance a support point may be moved by the suspension in one pass.
    pub support_point_step_cap: f64,
}

impl Default for FlightPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            speed_cap: 5.0,
            drag_multiplier: 0.05,
            static_drag: 0.95,
            static_drag_threshold: 0.2,
            maneuver_drag: 0.5,
            sensitivity_multiplier: 0.125,
            sensitivity_offset: 0.01,
            control_surface_decay: 0.9,
            control_surface_limit: 20.0,
            brake_speed_threshold: 0.5,
            support_point_step_cap: 32.0,
        }
    }
}
