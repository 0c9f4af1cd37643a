use crate::common::{assert_graph_is_consistent, Event, RecordingListener, ToggleFilter};
use rebound3d::dynamics::{ColliderDesc, ColliderShape, RigidBodyDesc, World};
use rebound3d::math::Vector;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn rejected_contacts_are_destroyed() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    let enabled = Rc::new(Cell::new(true));
    world.set_contact_listener(Some(Box::new(listener.clone())));
    world.set_contact_filter(Some(Box::new(ToggleFilter {
        enabled: enabled.clone(),
    })));

    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.0, 0.9, 0.0)));
    let co_a = world
        .insert_collider(ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)), a)
        .unwrap();
    let co_b = world
        .insert_collider(ColliderDesc::new(ColliderShape::ball(0.5)), b)
        .unwrap();

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
    assert_eq!(listener.count(|e| *e == Event::Begin(co_a, co_b)), 1);
    let _ = listener.take();

    enabled.set(false);
    world.step();

    assert_eq!(world.contact_manager().contact_count(), 0);
    assert_eq!(listener.take(), vec![Event::End(co_a, co_b)]);
    assert_graph_is_consistent(&world);

    // The filter also rejects the pair when it is found again.
    world.refilter_collider(co_b).unwrap();
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);

    enabled.set(true);
    world.refilter_collider(co_b).unwrap();
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
    assert_eq!(listener.take().first(), Some(&Event::Begin(co_a, co_b)));
}

#[test]
fn non_overlapping_contacts_end_silently() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    let enabled = Rc::new(Cell::new(true));
    world.set_contact_listener(Some(Box::new(listener.clone())));
    world.set_contact_filter(Some(Box::new(ToggleFilter {
        enabled: enabled.clone(),
    })));

    // Close enough for the enlarged bounds to overlap, too far to touch.
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(1.2, 0.0, 0.0)));
    let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
    let _ = world.insert_collider(ball(), a).unwrap();
    let _ = world.insert_collider(ball(), b).unwrap();

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
    assert!(world
        .contact_manager()
        .contacts()
        .all(|(_, c)| !c.is_overlapping()));

    enabled.set(false);
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);
    assert!(listener.take().is_empty());
}
