use crate::common::{Event, RecordingListener};
use rebound3d::dynamics::{ColliderDesc, ColliderShape, RigidBodyDesc, World};
use rebound3d::math::{Isometry, Vector};

#[test]
fn sensors_report_overlaps_without_waking_bodies() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));

    let sleeper = world.insert_body(RigidBodyDesc::dynamic().awake(false));
    let detector = world.insert_body(
        RigidBodyDesc::dynamic().translation(Vector::new(0.8, 0.0, 0.0)),
    );
    let cuboid = || ColliderShape::cuboid(0.5, 0.5, 0.5);
    let solid = world
        .insert_collider(ColliderDesc::new(cuboid()), sleeper)
        .unwrap();
    let sensor = world
        .insert_collider(ColliderDesc::new(cuboid()).sensor(true), detector)
        .unwrap();

    world.step();

    let manager = world.contact_manager();
    assert_eq!(manager.contact_count(), 1);
    let (_, contact) = manager.contacts().next().unwrap();
    assert!(contact.is_sensor());
    assert!(contact.is_overlapping());
    assert!(contact.manifolds().is_empty());
    assert!(manager
        .solver_contacts(world.colliders(), world.bodies())
        .is_empty());
    assert!(!world.bodies()[sleeper].is_awake());
    assert_eq!(listener.take(), vec![Event::Begin(solid, sensor)]);

    // Leave the solid box.
    world
        .set_body_position(detector, Isometry::translation(1.5, 0.0, 0.0))
        .unwrap();
    world.step();
    world.step();

    assert_eq!(listener.take(), vec![Event::End(solid, sensor)]);
    assert!(!world.bodies()[sleeper].is_awake());
}

#[test]
fn solid_contacts_reach_the_solver() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic().awake(false));
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.8, 0.0, 0.0)));
    let cuboid = || ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5));
    let _ = world.insert_collider(cuboid(), a).unwrap();
    let _ = world.insert_collider(cuboid(), b).unwrap();

    world.step();

    // A solid contact wakes both bodies up.
    assert!(world.bodies()[a].is_awake());
    let solver = world
        .contact_manager()
        .solver_contacts(world.colliders(), world.bodies());
    assert_eq!(solver.len(), 1);
}
