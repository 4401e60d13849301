use bevy::prelude::*;

use crate::components::{ChaseCamera, Vehicle};

/// Moves every chase camera after its vehicle and, when the camera entity is rendered, its
/// `Transform` with it.
pub fn chase_camera_system(
    mut camera_query: Query<(&mut ChaseCamera, Option<&mut Transform>), Without<Vehicle>>,
    vehicle_query: Query<&Vehicle>,
) {
    for (mut camera, transform) in camera_query.iter_mut() {
        let Some(target) = camera.target else {
            continue;
        };
        let Ok(vehicle) = vehicle_query.get(target) else {
            continue;
        };
        camera.follow(&vehicle.state);

        if let Some(mut transform) = transform {
            let position = camera.position;
            let focus = vehicle.state.position;
            transform.translation = Vec3::new(position.x as f32, position.y as f32, position.z as f32);
            transform.look_at(Vec3::new(focus.x as f32, focus.y as f32, focus.z as f32), Vec3::Y);
        }
    }
}
