use bevy::log::warn;
use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::components::{SupportPoint, Vehicle, VehicleEvent, VehicleType};
use crate::resources::{FlightPhysicsConfig, Terrain};
use crate::utils::{
    angle_between, clamp_magnitude, rotation_axis, SUPPORT_REACTION_GAIN, SUSPENSION_PASSES,
    VECTOR_EPSILON, WHEEL_PROPORTION,
};

/// Spring pull of one support point toward its rest pose.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringCorrection {
    /// Body-relative offset the point should move to.
    pub new_offset: Vector3<f64>,
    /// World axis and angle (radians) the point swings by. The body swings the other way.
    pub rotation: Option<(Unit<Vector3<f64>>, f64)>,
}

/// Moves `current` a `strength` fraction of the way toward `target`, in length and in angle.
/// Parallel or zero-length offsets only change length.
pub fn spring_correction(
    target: &Vector3<f64>,
    current: &Vector3<f64>,
    strength: f64,
) -> SpringCorrection {
    let target_length = target.norm();
    let current_length = current.norm();
    let new_length = current_length + (target_length - current_length) * strength;

    if let (Some(angle), Some(axis)) = (angle_between(target, current), rotation_axis(current, target)) {
        let step = angle * strength;
        let swung = UnitQuaternion::from_axis_angle(&axis, step) * current;
        return SpringCorrection {
            new_offset: swung.normalize() * new_length,
            rotation: Some((axis, step)),
        };
    }

    let direction = current
        .try_normalize(VECTOR_EPSILON)
        .or_else(|| target.try_normalize(VECTOR_EPSILON))
        .unwrap_or_else(Vector3::zeros);
    SpringCorrection {
        new_offset: direction * new_length,
        rotation: None,
    }
}

/// Moves a support point by `step`, capped at `cap` and resolved against the terrain.
/// Returns the attempted distance when the cap was hit.
pub fn move_support_point(
    point: &mut SupportPoint,
    mut step: Vector3<f64>,
    cap: f64,
    terrain: &Terrain,
) -> Option<f64> {
    let attempted = step.norm();
    let clamped = clamp_magnitude(&mut step, cap);
    point.position += terrain.resolve_motion(&point.position, &step);
    clamped.then_some(attempted)
}

/// Moves the body by `step` against the terrain. A blocked fall stops the fall.
fn move_body(vehicle: &mut Vehicle, step: &Vector3<f64>, terrain: &Terrain) {
    let state = &mut vehicle.state;
    let resolved = terrain.resolve_motion(&state.position, step);
    if resolved.y > step.y && state.velocity.y < 0.0 {
        state.velocity.y = 0.0;
    }
    state.position += resolved;
}

/// Integrates position for one tick and reconciles every support point with the body.
///
/// Body and support points are first moved by the full velocity against the terrain, so a
/// vehicle in free flight keeps its rest pose exactly. Then, over two passes, each point is
/// sprung toward its rest pose: the body swings and shifts to meet the points, the points
/// move a quarter of the way themselves, and any difference between how far a point actually
/// moved and how far it was told to move is fed back into the body as terrain reaction.
/// Velocity is only touched by buoyancy and by ground contact, which cancels a fall.
pub fn solve_suspension(
    vehicle: &mut Vehicle,
    vehicle_type: &VehicleType,
    physics: &FlightPhysicsConfig,
    terrain: &Terrain,
) -> Vec<VehicleEvent> {
    let mut events = Vec::new();

    vehicle.state.previous_position = vehicle.state.position;
    for point in vehicle.support_points.iter_mut() {
        point.previous_position = point.position;
    }

    if vehicle_type.float_on_water {
        let submerged = vehicle
            .support_points
            .iter()
            .filter(|point| terrain.in_liquid(&point.position))
            .count();
        vehicle.state.velocity.y += vehicle_type.buoyancy * submerged as f64;
    }

    let motion = vehicle.state.velocity;
    let mut grounded = false;
    for point in vehicle.support_points.iter_mut() {
        let resolved = terrain.resolve_motion(&point.position, &motion);
        grounded |= resolved.y > motion.y;
        point.position += resolved;
    }
    move_body(vehicle, &motion, terrain);

    let count = vehicle.support_points.len().max(1) as f64;
    for _ in 0..SUSPENSION_PASSES {
        let mut body_step = Vector3::zeros();

        for point in vehicle.support_points.iter_mut() {
            let state = &mut vehicle.state;
            let target = state.orientation.find_local_vector_globally(&point.rest_offset);
            let current = point.position - state.position;
            let correction = spring_correction(&target, &current, vehicle_type.spring_strength);
            if let Some((axis, angle)) = correction.rotation {
                state.orientation.rotate_global(-angle.to_degrees(), &axis);
            }

            let point_step = (correction.new_offset - current) * (1.0 - WHEEL_PROPORTION);
            body_step -= point_step;
            body_step.y += ((point.position.y - point.previous_position.y) - motion.y)
                * SUPPORT_REACTION_GAIN
                / count;

            if let Some(attempted) =
                move_support_point(point, point_step, physics.support_point_step_cap, terrain)
            {
                warn!(
                    "Support point {} of {} tried to move {:.1} in a single tick, capping at {}",
                    point.slot, vehicle.id, attempted, physics.support_point_step_cap
                );
                events.push(VehicleEvent::SupportPointClamped {
                    slot: point.slot,
                    attempted,
                });
            }
        }

        move_body(vehicle, &body_step, terrain);
    }

    // Points resting on the ground carry the body; it stops falling.
    if grounded && vehicle.state.velocity.y < 0.0 {
        vehicle.state.velocity.y = 0.0;
    }

    events
}
