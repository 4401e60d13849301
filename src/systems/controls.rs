use bevy::log::debug;

use crate::components::{ControlKey, ControlInput, FlightMode, Vehicle, VehicleKind, VehicleType};
use crate::utils::{FLAP_STEP, MOUSE_SENSITIVITY, THROTTLE_STEP, TOGGLE_COOLDOWN_TICKS};

/// Whether any thrust part of the current mode still works.
pub fn has_working_thrust(vehicle: &Vehicle, vehicle_type: &VehicleType) -> bool {
    let (working, _) = vehicle
        .parts
        .count_working(vehicle_type.thrust_parts(vehicle.state.mode));
    working > 0
}

/// Applies one tick of held keys and mouse movement to throttle, control surfaces, toggles
/// and brakes. Throttle may always be moved back toward idle, but only opened further while
/// the engine can thrust.
pub fn apply_control_input(vehicle: &mut Vehicle, vehicle_type: &VehicleType, input: &ControlInput) {
    let can_thrust = vehicle.can_thrust() && has_working_thrust(vehicle, vehicle_type);
    let reverse_limit = -vehicle_type.max_negative_throttle.clamp(0.0, 1.0);
    let state = &mut vehicle.state;

    state.brakes_engaged = input.pressed(ControlKey::Brake);

    for key in &input.keys {
        match key {
            ControlKey::Accelerate => {
                if can_thrust || state.throttle < 0.0 {
                    state.throttle = (state.throttle + THROTTLE_STEP).min(1.0);
                }
            }
            ControlKey::Decelerate => {
                if can_thrust || state.throttle > 0.0 {
                    state.throttle = (state.throttle - THROTTLE_STEP).max(reverse_limit);
                }
            }
            ControlKey::YawLeft => state.surfaces.yaw += FLAP_STEP,
            ControlKey::YawRight => state.surfaces.yaw -= FLAP_STEP,
            ControlKey::PitchUp => {
                state.surfaces.pitch_left += FLAP_STEP;
                state.surfaces.pitch_right += FLAP_STEP;
            }
            ControlKey::PitchDown => {
                state.surfaces.pitch_left -= FLAP_STEP;
                state.surfaces.pitch_right -= FLAP_STEP;
            }
            ControlKey::RollLeft => {
                state.surfaces.pitch_left -= FLAP_STEP;
                state.surfaces.pitch_right += FLAP_STEP;
            }
            ControlKey::RollRight => {
                state.surfaces.pitch_left += FLAP_STEP;
                state.surfaces.pitch_right -= FLAP_STEP;
            }
            ControlKey::ToggleGear | ControlKey::ToggleDoor | ControlKey::ToggleWing => {
                if state.toggle_cooldown > 0 {
                    continue;
                }
                state.toggle_cooldown = TOGGLE_COOLDOWN_TICKS;
                match key {
                    ControlKey::ToggleGear => state.toggles.gear_down = !state.toggles.gear_down,
                    ControlKey::ToggleDoor if vehicle_type.has_door => {
                        state.toggles.door_open = !state.toggles.door_open
                    }
                    ControlKey::ToggleWing => {
                        if vehicle_type.has_wing {
                            state.toggles.wing_deployed = !state.toggles.wing_deployed;
                        }
                        if vehicle_type.kind == VehicleKind::Vtol {
                            state.mode = match state.mode {
                                FlightMode::RotaryWing => FlightMode::FixedWing,
                                _ => FlightMode::RotaryWing,
                            };
                            debug!("Vehicle {} switched to {:?}", vehicle.id, state.mode);
                        }
                    }
                    _ => {}
                }
            }
            ControlKey::Trim => {
                let yaw = state.orientation.yaw();
                state.orientation.set_angles(yaw, 0.0, 0.0);
            }
            ControlKey::Brake => {}
        }
    }

    // Screen-space deltas: moving down deflects like PitchUp, moving right like RollRight.
    if input.mouse_control {
        let (dx, dy) = input.mouse_delta;
        state.surfaces.pitch_left += (dy + dx) * MOUSE_SENSITIVITY;
        state.surfaces.pitch_right += (dy - dx) * MOUSE_SENSITIVITY;
    }
}
