use bevy::prelude::*;

use crate::components::{NetworkReconciler, Vehicle, VehicleEvent};
use crate::plugins::{ControllerRequest, DamageRequest, DriveableEvent, RepairRequest};

/// Applies damage, repair and controller changes requested by outside collaborators
/// (weapons, crafting, seats) before the tick runs.
pub fn vehicle_request_system(
    mut damage: EventReader<DamageRequest>,
    mut repairs: EventReader<RepairRequest>,
    mut controllers: EventReader<ControllerRequest>,
    mut query: Query<(&mut Vehicle, &mut NetworkReconciler)>,
    mut events: EventWriter<DriveableEvent>,
) {
    for request in damage.read() {
        let Ok((mut vehicle, _)) = query.get_mut(request.entity) else {
            warn!("Damage request for missing vehicle {:?}", request.entity);
            continue;
        };
        for event in vehicle.apply_damage(request.part, request.amount) {
            events.send(DriveableEvent {
                entity: request.entity,
                event,
            });
        }
    }

    for request in repairs.read() {
        let Ok((mut vehicle, _)) = query.get_mut(request.entity) else {
            warn!("Repair request for missing vehicle {:?}", request.entity);
            continue;
        };
        if vehicle.repair(request.part) {
            events.send(DriveableEvent {
                entity: request.entity,
                event: VehicleEvent::PartRepaired(request.part),
            });
        } else {
            debug!("Repair of {:?} on {} refused", request.part, vehicle.id);
        }
    }

    for request in controllers.read() {
        let Ok((mut vehicle, mut reconciler)) = query.get_mut(request.entity) else {
            warn!("Controller request for missing vehicle {:?}", request.entity);
            continue;
        };
        if request.controlled {
            reconciler.begin_control();
        } else {
            reconciler.end_control();
        }
        if let Some(event) = vehicle.set_controller(request.controlled) {
            events.send(DriveableEvent {
                entity: request.entity,
                event,
            });
        }
    }
}
