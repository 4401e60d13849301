//! Fixed constants of the driveable model. Anything a server operator may want to tune
//! lives in [`crate::resources::DriveableConfig`] instead.

/// Ticks per second of the reference simulation.
pub const TICKS_PER_SECOND: f64 = 20.0;

/// Gravity in units/tick²: 9.81 m/s² divided by 20² ticks.
pub const GRAVITY: f64 = 9.81 / 400.0;

/// Maximum lift as a fraction of gravity at full throttle.
pub const MAX_LIFT_FRACTION: f64 = 0.7;
/// Lift multiplier applied while the tail is missing.
pub const TAILLESS_LIFT_FACTOR: f64 = 0.75;
/// Roll bias (degrees per unit of horizontal speed) from a missing wing.
pub const MISSING_WING_ROLL: f64 = 7.0;
/// Fraction of the throttle used to blend velocity toward the facing vector.
pub const ALIGNMENT_ALPHA: f64 = 0.5;
/// Speed and throttle a piloted plane needs before velocity is aligned with its nose.
pub const ALIGNMENT_MIN_SPEED: f64 = 0.1;
pub const ALIGNMENT_MIN_THROTTLE: f64 = 0.1;

/// Per-tick throttle pull toward the hover throttle in rotary-wing mode.
pub const THROTTLE_PULL: f64 = 0.99;
/// Horizontal share of rotor thrust; a tilted rotor mostly lifts.
pub const ROTOR_HORIZONTAL_FACTOR: f64 = 0.5;

/// Throttle change per held accelerate/decelerate key.
pub const THROTTLE_STEP: f64 = 0.01;
/// Control-surface deflection per held direction key (degrees).
pub const FLAP_STEP: f64 = 4.0;
/// Control-surface deflection per mouse count (degrees).
pub const MOUSE_SENSITIVITY: f64 = 0.02;
/// Ticks between two gear/door/wing toggles.
pub const TOGGLE_COOLDOWN_TICKS: u32 = 10;

/// Energy units drawn from a battery per abstract fuel unit consumed.
pub const ENERGY_PER_FUEL_UNIT: f64 = 1200.0;
/// Energy units of battery capacity per fuel unit of nominal tank size.
pub const ENERGY_STORAGE_PER_FUEL_UNIT: f64 = 600.0;

/// Share of a spring correction treated as body motion rather than wheel motion.
pub const WHEEL_PROPORTION: f64 = 0.75;
/// Gain on the vertical terrain reaction a support point feeds back to the body.
pub const SUPPORT_REACTION_GAIN: f64 = 0.5;
/// Spring passes per tick.
pub const SUSPENSION_PASSES: usize = 2;

/// Throttle window in which the engine start-up cue plays.
pub const STARTUP_SOUND_THROTTLE: (f64, f64) = (0.01, 0.2);

/// Propeller animation gain and exponent.
pub const PROP_SPIN_GAIN: f64 = 1.5;
pub const PROP_SPIN_EXPONENT: f64 = 0.4;

/// Chase camera smoothing.
pub const CAMERA_LERP_ALPHA: f64 = 0.25;
pub const CAMERA_ZOOM_PER_SQRT_SPEED: f64 = 0.1;

/// Vectors shorter than this are treated as zero for angle and axis computations.
pub const VECTOR_EPSILON: f64 = 1e-9;
