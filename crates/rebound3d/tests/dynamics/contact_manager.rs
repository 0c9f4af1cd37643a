use crate::common::{assert_graph_is_consistent, Event, RecordingListener};
use approx::assert_relative_eq;
use rebound3d::dynamics::{ColliderDesc, ColliderHandle, ColliderShape, RigidBodyDesc, World};
use rebound3d::math::{Isometry, Vector};

fn two_balls(world: &mut World, distance: f32) -> (ColliderHandle, ColliderHandle) {
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(
        RigidBodyDesc::dynamic().translation(Vector::new(distance, 0.0, 0.0)),
    );
    let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
    let co_a = world.insert_collider(ball(), a).unwrap();
    let co_b = world.insert_collider(ball(), b).unwrap();
    (co_a, co_b)
}

#[test]
fn shapes_of_the_same_body_never_collide() {
    let mut world = World::default();
    let body = world.insert_body(RigidBodyDesc::dynamic());
    let a = world
        .insert_collider(ColliderDesc::new(ColliderShape::ball(0.5)), body)
        .unwrap();
    let b = world
        .insert_collider(ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)), body)
        .unwrap();

    assert!(world.add_pair(a, b).is_none());
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);
}

#[test]
fn adding_an_existing_pair_is_a_no_op() {
    let mut world = World::default();
    let (a, b) = two_balls(&mut world, 0.9);

    assert!(world.add_pair(a, b).is_some());
    assert!(world.add_pair(a, b).is_none());
    assert!(world.add_pair(b, a).is_none());
    world.step();
    world.step();

    assert_eq!(world.contact_manager().contact_count(), 1);
    assert!(world
        .contact_manager()
        .contact_pair(b, a, world.colliders())
        .is_some());
    assert_graph_is_consistent(&world);
}

#[test]
fn the_graph_stays_consistent() {
    let mut world = World::default();
    let ground = world.insert_body(RigidBodyDesc::fixed());
    let _ = world
        .insert_collider(ColliderDesc::new(ColliderShape::cuboid(10.0, 0.1, 10.0)), ground)
        .unwrap();

    let mut colliders = Vec::new();
    for i in 0..6 {
        let pos = Vector::new(i as f32 * 0.8, 0.5, 0.0);
        let body = world.insert_body(RigidBodyDesc::dynamic().translation(pos));
        let shape = if i % 2 == 0 {
            ColliderShape::ball(0.5)
        } else {
            ColliderShape::capsule_y(0.2, 0.4)
        };
        colliders.push(world.insert_collider(ColliderDesc::new(shape), body).unwrap());
    }

    world.step();
    assert!(world.contact_manager().contact_count() > 0);
    assert_graph_is_consistent(&world);

    world.remove_collider(colliders[1]).unwrap();
    world.remove_collider(colliders[4]).unwrap();
    assert_graph_is_consistent(&world);

    world.step();
    assert_graph_is_consistent(&world);
}

#[test]
fn end_contact_fires_once_when_separating() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));
    let (a, b) = two_balls(&mut world, 0.9);

    world.step();
    assert_eq!(listener.count(|e| matches!(e, Event::Begin(..))), 1);
    let handle = world
        .contact_manager()
        .contact_pair(a, b, world.colliders())
        .unwrap();
    assert!(world.contact_manager().contact(handle).unwrap().is_overlapping());
    let _ = listener.take();

    // Still within the enlarged bounds, but out of the prediction distance.
    let body_b = world.colliders()[b].body();
    world
        .set_body_position(body_b, Isometry::translation(1.05, 0.0, 0.0))
        .unwrap();
    world.step();
    world.step();

    assert_eq!(listener.take(), vec![Event::End(a, b)]);
    let contact = world.contact_manager().contact(handle).unwrap();
    assert!(!contact.is_overlapping());
    assert!(contact.manifolds().is_empty());
    assert_eq!(world.contact_manager().contact_count(), 1);
}

#[test]
fn end_contact_fires_once_when_destroyed() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));
    let (a, b) = two_balls(&mut world, 0.9);

    world.step();
    let _ = listener.take();

    world.remove_collider(b).unwrap();
    assert_eq!(listener.take(), vec![Event::End(a, b)]);
    assert_eq!(world.contact_manager().contact_count(), 0);
    assert!(world.colliders()[a].contact_edges().is_empty());

    world.step();
    assert!(listener.take().is_empty());
}

#[test]
fn far_pairs_are_destroyed() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));
    let (a, b) = two_balls(&mut world, 0.9);

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);

    let body_b = world.colliders()[b].body();
    world
        .set_body_position(body_b, Isometry::translation(20.0, 0.0, 0.0))
        .unwrap();
    world.step();

    assert_eq!(world.contact_manager().contact_count(), 0);
    assert_eq!(listener.count(|e| *e == Event::End(a, b)), 1);
    assert_graph_is_consistent(&world);
}

#[test]
fn persistent_points_keep_their_impulses() {
    let mut world = World::default();
    let (a, b) = two_balls(&mut world, 0.9);
    world.step();

    let handle = world
        .contact_manager()
        .contact_pair(a, b, world.colliders())
        .unwrap();
    world
        .contact_manager_mut()
        .contact_mut(handle)
        .unwrap()
        .manifolds_mut()[0]
        .points[0]
        .normal_impulse = 4.0;

    let body_b = world.colliders()[b].body();
    world
        .set_body_position(body_b, Isometry::translation(0.91, 0.0, 0.0))
        .unwrap();
    world.step();

    let contact = world.contact_manager().contact(handle).unwrap();
    let manifold = &contact.manifolds()[0];
    assert_eq!(manifold.points[0].normal_impulse, 4.0);
    assert_relative_eq!(manifold.normal.x, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(manifold.points[0].dist, -0.09, epsilon = 1.0e-5);
}

#[test]
fn sleeping_pairs_are_not_updated() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));
    let (a, b) = two_balls(&mut world, 0.9);
    world.step();
    let _ = listener.take();

    for co in [a, b] {
        let body = world.colliders()[co].body();
        world.set_body_awake(body, false).unwrap();
    }
    world.step();

    assert!(listener.take().is_empty());
    assert_eq!(world.contact_manager().contact_count(), 1);
}

#[test]
fn resting_boxes_touch_on_a_face() {
    let mut world = World::default();
    let ground = world.insert_body(RigidBodyDesc::fixed());
    let cuboid = || ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5));
    let a = world.insert_collider(cuboid(), ground).unwrap();
    let body = world.insert_body(
        RigidBodyDesc::dynamic().translation(Vector::new(0.0, 0.99, 0.0)),
    );
    let b = world.insert_collider(cuboid(), body).unwrap();
    world.step();

    let handle = world
        .contact_manager()
        .contact_pair(a, b, world.colliders())
        .unwrap();
    let contact = world.contact_manager().contact(handle).unwrap();
    assert!(contact.total_point_count() >= 4);

    let manifold = &contact.manifolds()[0];
    assert_relative_eq!(manifold.normal.y.abs(), 1.0, epsilon = 1.0e-5);
    let mut keys: Vec<_> = manifold.points.iter().map(|pt| pt.key).collect();
    for pt in &manifold.points {
        assert_relative_eq!(pt.dist, -0.01, epsilon = 1.0e-4);
    }
    keys.sort_unstable_by_key(|key| key.feature);
    keys.dedup();
    assert_eq!(keys.len(), manifold.len());

    // Every point keeps its impulse while the box stays still.
    for (i, pt) in world
        .contact_manager_mut()
        .contact_mut(handle)
        .unwrap()
        .manifolds_mut()[0]
        .points
        .iter_mut()
        .enumerate()
    {
        pt.normal_impulse = i as f32 + 1.0;
    }
    world.step();

    let manifold = &world.contact_manager().contact(handle).unwrap().manifolds()[0];
    let mut impulses: Vec<_> = manifold.points.iter().map(|pt| pt.normal_impulse).collect();
    impulses.sort_by(f32::total_cmp);
    let expected: Vec<_> = (1..=manifold.len()).map(|i| i as f32).collect();
    assert_eq!(impulses, expected);
}

#[test]
fn several_contacts_end_in_one_update() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));

    let pairs: Vec<_> = (0..5)
        .map(|i| {
            let z = i as f32 * 10.0;
            let a = world.insert_body(
                RigidBodyDesc::dynamic().translation(Vector::new(0.0, 0.0, z)),
            );
            let b = world.insert_body(
                RigidBodyDesc::dynamic().translation(Vector::new(0.9, 0.0, z)),
            );
            let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
            let co_a = world.insert_collider(ball(), a).unwrap();
            let co_b = world.insert_collider(ball(), b).unwrap();
            (co_a, co_b)
        })
        .collect();

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 5);
    let _ = listener.take();

    for i in [0, 2, 4] {
        let body_b = world.colliders()[pairs[i].1].body();
        world
            .set_body_position(body_b, Isometry::translation(20.0, 0.0, i as f32 * 10.0))
            .unwrap();
    }
    world.step();

    let mut ended = listener.take();
    ended.retain(|e| matches!(e, Event::End(..)));
    assert_eq!(ended.len(), 3);
    for i in [0, 2, 4] {
        let (a, b) = pairs[i];
        assert!(ended.contains(&Event::End(a, b)));
        assert!(world
            .contact_manager()
            .contact_pair(a, b, world.colliders())
            .is_none());
    }

    assert_eq!(world.contact_manager().contact_count(), 2);
    for i in [1, 3] {
        let (a, b) = pairs[i];
        let handle = world
            .contact_manager()
            .contact_pair(a, b, world.colliders())
            .unwrap();
        assert!(world.contact_manager().contact(handle).unwrap().is_overlapping());
    }
    assert_graph_is_consistent(&world);
}

#[test]
fn removed_handles_are_never_reused() {
    let mut world = World::default();
    let (a, b) = two_balls(&mut world, 0.9);
    world.step();
    let old_contact = world
        .contact_manager()
        .contact_pair(a, b, world.colliders())
        .unwrap();

    let old_body = world.colliders()[b].body();
    world.remove_collider(b).unwrap();
    world.remove_body(old_body).unwrap();
    assert!(world.contact_manager().contact(old_contact).is_none());

    let body = world.insert_body(
        RigidBodyDesc::dynamic().translation(Vector::new(0.9, 0.0, 0.0)),
    );
    let c = world
        .insert_collider(ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)), body)
        .unwrap();
    let contact = world.add_pair(a, c).unwrap();

    assert_ne!(body, old_body);
    assert_ne!(c, b);
    assert_ne!(contact, old_contact);
    assert!(world.bodies().get(old_body).is_none());
    assert!(world.colliders().get(b).is_none());
    assert!(!world.colliders().contains(b));
    assert!(world.contact_manager().contact(old_contact).is_none());
    assert!(world.remove_collider(b).is_err());
    assert!(world.remove_body(old_body).is_err());

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
    assert_eq!(world.colliders()[c].body(), body);
    assert_graph_is_consistent(&world);
}
