use bevy::prelude::*;

use super::controls::apply_control_input;
use super::dynamics::dynamics_step;
use super::suspension::solve_suspension;
use crate::components::{
    ControlInput, NetworkReconciler, SoundCue, Vehicle, VehicleEvent, VehicleType,
};
use crate::plugins::{DriveableEvent, OutboundSnapshot};
use crate::resources::{DriveableConfig, Terrain};
use crate::utils::{PROP_SPIN_EXPONENT, PROP_SPIN_GAIN, STARTUP_SOUND_THROTTLE};

/// Everything outside the vehicle a tick reads.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub config: &'a DriveableConfig,
    pub terrain: &'a Terrain,
    /// Only the authoritative context may despawn a vehicle.
    pub authoritative: bool,
}

impl<'a> TickContext<'a> {
    pub fn authoritative(config: &'a DriveableConfig, terrain: &'a Terrain) -> Self {
        Self {
            config,
            terrain,
            authoritative: true,
        }
    }

    pub fn remote(config: &'a DriveableConfig, terrain: &'a Terrain) -> Self {
        Self {
            config,
            terrain,
            authoritative: false,
        }
    }
}

/// Advances one vehicle by one tick and reports what happened.
///
/// Order: idle/despawn bookkeeping, toggle cooldown, control input, propeller animation,
/// control-surface relaxation, dynamics, suspension and position, sound cues. Dead vehicles
/// are skipped entirely.
pub fn tick_vehicle(
    vehicle: &mut Vehicle,
    vehicle_type: &VehicleType,
    input: &ControlInput,
    ctx: &TickContext,
) -> Vec<VehicleEvent> {
    let mut events = Vec::new();
    if vehicle.state.dead {
        return events;
    }

    let state = &mut vehicle.state;
    state.ticks_since_used += 1;
    if state.has_controller {
        state.ticks_since_used = 0;
    }
    if ctx.authoritative {
        if let Some(lifetime) = ctx.config.lifetime_ticks() {
            if state.ticks_since_used > lifetime {
                state.dead = true;
                info!("Vehicle {} despawned after {} idle ticks", vehicle.id, lifetime);
                events.push(VehicleEvent::Despawned);
                return events;
            }
        }
    }
    state.toggle_cooldown = state.toggle_cooldown.saturating_sub(1);

    apply_control_input(vehicle, vehicle_type, input);

    let physics = &ctx.config.physics;
    let can_thrust = vehicle.can_thrust();
    advance_propeller(&mut vehicle.state.prop_angle, vehicle.state.throttle, can_thrust);
    vehicle
        .state
        .surfaces
        .relax(physics.control_surface_decay, physics.control_surface_limit);

    let report = dynamics_step(vehicle, vehicle_type, ctx.config);
    events.extend(solve_suspension(vehicle, vehicle_type, physics, ctx.terrain));

    let can_thrust = vehicle.can_thrust();
    if let Some(event) = propulsion_sound(vehicle, vehicle_type, can_thrust) {
        events.push(event);
    }
    if report.fuel_depleted {
        events.push(VehicleEvent::FuelDepleted);
    }

    vehicle.state.brakes_engaged = false;
    events
}

/// Spins the propeller animation while there is fuel to drive it.
fn advance_propeller(prop_angle: &mut f64, throttle: f64, can_thrust: bool) {
    if can_thrust {
        *prop_angle = (*prop_angle + throttle.abs().powf(PROP_SPIN_EXPONENT) * PROP_SPIN_GAIN)
            .rem_euclid(360.0);
    }
}

/// Start-up cue at low throttle, engine cue above it, each re-armed after the type's sound
/// length; a stop cue once the engine has nothing left to play.
fn propulsion_sound(
    vehicle: &mut Vehicle,
    vehicle_type: &VehicleType,
    can_thrust: bool,
) -> Option<VehicleEvent> {
    let state = &mut vehicle.state;
    let (low, high) = STARTUP_SOUND_THROTTLE;
    let mut event = None;

    if state.sound_timer == 0 && can_thrust {
        if state.throttle > low && state.throttle < high {
            state.sound_timer = vehicle_type.start_sound_length;
            state.propulsion_sound = true;
            event = Some(VehicleEvent::StartPropulsionSound(SoundCue::Startup));
        } else if state.throttle > high {
            state.sound_timer = vehicle_type.engine_sound_length;
            state.propulsion_sound = true;
            event = Some(VehicleEvent::StartPropulsionSound(SoundCue::Engine));
        }
    }
    if event.is_none() && state.propulsion_sound && (state.throttle <= low || !can_thrust) {
        state.propulsion_sound = false;
        state.sound_timer = 0;
        event = Some(VehicleEvent::StopPropulsionSound);
    }

    state.sound_timer = state.sound_timer.saturating_sub(1);
    event
}

impl Vehicle {
    pub fn tick(
        &mut self,
        vehicle_type: &VehicleType,
        input: &ControlInput,
        ctx: &TickContext,
    ) -> Vec<VehicleEvent> {
        tick_vehicle(self, vehicle_type, input, ctx)
    }
}

/// Runs one fixed tick for every vehicle through its network role, then clears the input.
pub fn vehicle_tick_system(
    mut query: Query<(
        Entity,
        &mut Vehicle,
        &VehicleType,
        &mut NetworkReconciler,
        &mut ControlInput,
    )>,
    config: Res<DriveableConfig>,
    terrain: Res<Terrain>,
    mut events: EventWriter<DriveableEvent>,
    mut outbound: EventWriter<OutboundSnapshot>,
) {
    for (entity, mut vehicle, vehicle_type, mut reconciler, mut input) in query.iter_mut() {
        let outcome = reconciler.tick(&mut vehicle, vehicle_type, &input, &config, &terrain);
        for event in outcome.events {
            events.send(DriveableEvent { entity, event });
        }
        if let Some(snapshot) = outcome.outbound {
            outbound.send(OutboundSnapshot { entity, snapshot });
        }
        input.clear();
    }
}

/// Removes dead vehicles once their final events have been sent.
pub fn despawn_dead_vehicles_system(mut commands: Commands, query: Query<(Entity, &Vehicle)>) {
    for (entity, vehicle) in query.iter() {
        if vehicle.is_dead() {
            info!("Removing vehicle {}", vehicle.id);
            commands.entity(entity).despawn();
        }
    }
}
