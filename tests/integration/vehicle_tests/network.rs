use driveable::components::{
    ControlInput, ControlKey, NetworkReconciler, VehicleEvent, VehicleSnapshot, VehicleType,
};
use driveable::plugins::{
    ControllerRequest, DriveableBundle, DriveableEvent, InboundSnapshot, OutboundSnapshot,
};
use driveable::systems::TickContext;
use nalgebra::Vector3;
use pretty_assertions::assert_eq;

use crate::common::{
    assert_position_eq, assert_vehicle_state_valid, long_range_biplane, open_sky, piloted,
    test_config, TestAppBuilder,
};

fn scripted_input(tick: usize) -> ControlInput {
    match tick % 40 {
        0..=19 => ControlInput::from_keys([ControlKey::Accelerate]),
        20..=24 => ControlInput::from_keys([ControlKey::YawLeft, ControlKey::PitchUp]),
        25..=29 => ControlInput::default().with_mouse(3.0, -2.0),
        _ => ControlInput::default(),
    }
}

#[test]
fn test_same_inputs_give_identical_state_everywhere() {
    let config = test_config();
    let terrain = open_sky();
    let vehicle_type = long_range_biplane();
    let mut server = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));
    let mut client = server.clone();

    for tick in 0..200 {
        let input = scripted_input(tick);
        server.tick(&vehicle_type, &input, &TickContext::authoritative(&config, &terrain));
        client.tick(&vehicle_type, &input, &TickContext::remote(&config, &terrain));
    }

    assert_eq!(server, client);
}

#[test]
fn test_cut_off_observer_matches_authority_bit_for_bit() {
    let mut config = test_config();
    config.network.interpolation_ticks = 0;
    let terrain = open_sky();
    let vehicle_type = long_range_biplane();
    let mut server = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));
    let mut observed = server.clone();
    let mut authority = NetworkReconciler::authoritative();
    let mut observer = NetworkReconciler::observing();

    let held = ControlInput::from_keys([ControlKey::Accelerate, ControlKey::RollLeft]);
    let last_words = VehicleSnapshot::capture(&server, 0, &held);
    observer.receive(&mut observed, &vehicle_type, last_words, &config.network);

    for _ in 0..200 {
        authority.tick(&mut server, &vehicle_type, &held, &config, &terrain);
        observer.tick(&mut observed, &vehicle_type, &ControlInput::default(), &config, &terrain);
    }

    assert_eq!(observed, server);
}

#[test]
fn test_cut_off_observer_continues_like_authority_after_glide() {
    let config = test_config();
    let window = config.network.interpolation_ticks;
    assert!(window > 1);
    let terrain = open_sky();
    let vehicle_type = long_range_biplane();
    let mut server = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));
    let mut observed = server.clone();
    let mut authority = NetworkReconciler::authoritative();
    let mut observer = NetworkReconciler::observing();

    let held = ControlInput::from_keys([ControlKey::Accelerate]);
    let mut last_sample = None;
    for _ in 0..30 {
        let outcome = authority.tick(&mut server, &vehicle_type, &held, &config, &terrain);
        if let Some(snapshot) = outcome.outbound {
            last_sample = Some(snapshot);
        }
    }
    let Some(last_sample) = last_sample else {
        panic!("authority never published");
    };
    assert_eq!(last_sample.position, server.state.position);

    // The link drops here: the observer only ever sees the last sample.
    let mut replay = server.clone();
    observer.receive(&mut observed, &vehicle_type, last_sample.clone(), &config.network);
    for _ in 0..window {
        observer.tick(&mut observed, &vehicle_type, &ControlInput::default(), &config, &terrain);
    }
    assert_eq!(observed.state.position, last_sample.position);
    assert_eq!(observed.state.velocity, last_sample.velocity);

    let ctx = TickContext::authoritative(&config, &terrain);
    for tick in 0..100 {
        observer.tick(&mut observed, &vehicle_type, &ControlInput::default(), &config, &terrain);
        replay.tick(&vehicle_type, &held, &ctx);

        assert_eq!(observed.state.throttle, replay.state.throttle, "throttle at tick {}", tick);
        assert_position_eq(&observed.state.position, &replay.state.position, 1e-9);
        assert_position_eq(&observed.state.velocity, &replay.state.velocity, 1e-9);
        let attitude_gap = (observed.state.orientation.rotation().coords
            - replay.state.orientation.rotation().coords)
            .norm();
        assert!(attitude_gap < 1e-9, "attitude drifted {} at tick {}", attitude_gap, tick);
    }
    assert!(observed.state.position.x > last_sample.position.x);
}

#[test]
fn test_observer_follows_authority_and_lands_on_last_sample() {
    let vehicle_type = long_range_biplane();
    let vehicle = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));

    let mut server = TestAppBuilder::new().with_terrain(open_sky()).build();
    let mut client = TestAppBuilder::new().with_terrain(open_sky()).build();
    let on_server = server.spawn(DriveableBundle::from_vehicle(
        vehicle.clone(),
        vehicle_type.clone(),
        NetworkReconciler::authoritative(),
    ));
    let on_client = client.spawn(DriveableBundle::from_vehicle(
        vehicle,
        vehicle_type,
        NetworkReconciler::observing(),
    ));

    let mut last_sample = None;
    for _ in 0..60 {
        server.press(on_server, ControlInput::from_keys([ControlKey::Accelerate]));
        server.run_ticks(1);
        let outbound = server.drain_events::<OutboundSnapshot>();
        assert!(outbound.iter().all(|sent| sent.entity == on_server));
        for OutboundSnapshot { snapshot, .. } in outbound {
            last_sample = Some(snapshot.clone());
            client.send(InboundSnapshot { snapshot });
        }
        client.run_ticks(1);
        assert!(client.drain_events::<OutboundSnapshot>().is_empty());
    }

    let Some(last_sample) = last_sample else {
        panic!("authority never published");
    };
    let interpolation_ticks = test_config().network.interpolation_ticks as usize;
    client.run_ticks(interpolation_ticks - 1);

    let Some(observed) = client.vehicle(on_client) else {
        panic!("observed vehicle missing");
    };
    assert_eq!(observed.state.position, last_sample.position);
    assert_eq!(observed.state.orientation, last_sample.orientation);
    assert_eq!(observed.state.throttle, last_sample.throttle);
}

#[test]
fn test_authority_takes_controlling_client_motion() {
    let vehicle_type = VehicleType::biplane();
    let vehicle = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));

    let mut server = TestAppBuilder::new().with_terrain(open_sky()).build();
    let mut client = TestAppBuilder::new().with_terrain(open_sky()).build();
    let on_server = server.spawn(DriveableBundle::from_vehicle(
        vehicle.clone(),
        vehicle_type.clone(),
        NetworkReconciler::authoritative(),
    ));
    let on_client = client.spawn(DriveableBundle::from_vehicle(
        vehicle,
        vehicle_type,
        NetworkReconciler::observing(),
    ));

    client.send(ControllerRequest {
        entity: on_client,
        controlled: true,
    });

    for _ in 0..30 {
        client.press(on_client, ControlInput::from_keys([ControlKey::Accelerate]));
        client.run_ticks(1);
        for OutboundSnapshot { snapshot, .. } in client.drain_events::<OutboundSnapshot>() {
            server.send(InboundSnapshot { snapshot });
        }
        server.run_ticks(1);

        let (Some(local), Some(remote)) = (client.vehicle(on_client), server.vehicle(on_server))
        else {
            panic!("vehicle missing");
        };
        assert_eq!(remote.state.throttle, local.state.throttle);
    }

    let Some(reconciler) = client.query_single::<NetworkReconciler>() else {
        panic!("client reconciler missing");
    };
    assert!(reconciler.is_predicting());

    let (Some(local), Some(remote)) = (client.vehicle(on_client), server.vehicle(on_server)) else {
        panic!("vehicle missing");
    };
    assert!(local.throttle() > 0.25);
    let gap = (local.state.position - remote.state.position).norm();
    assert!(gap <= 2.0 * test_config().physics.speed_cap, "server drifted {}", gap);
}

#[test]
fn test_authority_survives_corrupted_client_snapshot() {
    let vehicle_type = VehicleType::biplane();
    let vehicle = piloted(&vehicle_type, Vector3::new(0.0, 500.0, 0.0));
    let mut server = TestAppBuilder::new().with_terrain(open_sky()).build();
    let on_server = server.spawn(DriveableBundle::from_vehicle(
        vehicle.clone(),
        vehicle_type,
        NetworkReconciler::authoritative(),
    ));

    let mut corrupted = VehicleSnapshot::capture(&vehicle, 4, &ControlInput::default());
    corrupted.throttle = f64::NAN;
    corrupted.velocity.x = f64::NAN;
    server.send(InboundSnapshot {
        snapshot: corrupted,
    });
    server.run_ticks(1);

    let rejected = server
        .drain_events::<DriveableEvent>()
        .into_iter()
        .filter(|raised| raised.entity == on_server)
        .any(|raised| raised.event == VehicleEvent::SnapshotRejected { tick: 4 });
    assert!(rejected);

    server.run_ticks(20);
    let Some(authoritative) = server.vehicle(on_server) else {
        panic!("vehicle missing");
    };
    assert_vehicle_state_valid(authoritative);
}
