use crate::common::{assert_graph_is_consistent, Event, RecordingListener};
use approx::assert_relative_eq;
use rebound3d::dynamics::{
    ColliderDesc, ColliderShape, ContactKind, ContactType, RigidBodyDesc, World,
};
use rebound3d::math::{Isometry, Point};

// Two triangles far away from each other.
fn ground() -> ColliderShape {
    let vertices = vec![
        Point::new(-5.0, 0.0, -5.0),
        Point::new(5.0, 0.0, -5.0),
        Point::new(0.0, 0.0, 5.0),
        Point::new(20.0, 0.0, -5.0),
        Point::new(30.0, 0.0, -5.0),
        Point::new(25.0, 0.0, 5.0),
    ];
    ColliderShape::mesh(vertices, vec![[0, 1, 2], [3, 4, 5]]).unwrap()
}

#[test]
fn box_falling_on_a_mesh() {
    let mut world = World::default();
    let listener = RecordingListener::default();
    world.set_contact_listener(Some(Box::new(listener.clone())));

    let ground_body = world.insert_body(RigidBodyDesc::fixed());
    let mesh = world
        .insert_collider(ColliderDesc::new(ground()), ground_body)
        .unwrap();
    let box_body = world.insert_body(
        RigidBodyDesc::dynamic().position(Isometry::translation(0.0, 3.0, 0.0)),
    );
    let cuboid = world
        .insert_collider(
            ColliderDesc::new(ColliderShape::cuboid(0.5, 0.5, 0.5)),
            box_body,
        )
        .unwrap();

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);

    for y in [2.5, 2.0, 1.5, 1.0, 0.49] {
        world
            .set_body_position(box_body, Isometry::translation(0.0, y, 0.0))
            .unwrap();
        world.step();
        assert!(world.contact_manager().contact_count() <= 1);
    }

    assert_eq!(world.contact_manager().contact_count(), 1);
    let handle = world
        .contact_manager()
        .contact_pair(mesh, cuboid, world.colliders())
        .unwrap();

    let check = |world: &World| {
        let contact = world.contact_manager().contact(handle).unwrap();
        assert_eq!(contact.contact_type(), ContactType::MeshAndHull);
        assert_eq!(contact.collider_a(), mesh);
        assert!(contact.is_overlapping());

        let ContactKind::Mesh(mesh_contact) = contact.kind() else {
            panic!("expected a mesh contact");
        };
        let tracked: Vec<_> = mesh_contact.triangles().iter().map(|t| t.index).collect();
        assert_eq!(tracked, vec![0]);

        assert!(contact.total_point_count() > 0);
        for manifold in contact.manifolds() {
            assert_relative_eq!(manifold.normal.y, 1.0, epsilon = 1.0e-3);
            for point in &manifold.points {
                assert_eq!(point.key.triangle, 0);
                assert_relative_eq!(point.dist, -0.01, epsilon = 1.0e-3);
            }
        }
    };
    check(&world);

    // Resting on the ground.
    for _ in 0..5 {
        world.step();
        assert_eq!(world.contact_manager().contact_count(), 1);
        check(&world);
    }

    assert_eq!(listener.count(|e| *e == Event::Begin(mesh, cuboid)), 1);
    assert_eq!(listener.count(|e| matches!(e, Event::End(..))), 0);
    assert_graph_is_consistent(&world);
}

#[test]
fn moving_over_the_mesh_updates_the_triangles() {
    let mut world = World::default();
    let ground_body = world.insert_body(RigidBodyDesc::fixed());
    let mesh = world
        .insert_collider(ColliderDesc::new(ground()), ground_body)
        .unwrap();
    let ball_body = world.insert_body(
        RigidBodyDesc::dynamic().position(Isometry::translation(0.0, 0.4, 0.0)),
    );
    let ball = world
        .insert_collider(ColliderDesc::new(ColliderShape::ball(0.5)), ball_body)
        .unwrap();

    world.step();
    let handle = world
        .contact_manager()
        .contact_pair(mesh, ball, world.colliders())
        .unwrap();

    let tracked = |world: &World| -> Vec<u32> {
        match world.contact_manager().contact(handle).unwrap().kind() {
            ContactKind::Mesh(mesh_contact) => {
                mesh_contact.triangles().iter().map(|t| t.index).collect()
            }
            other => panic!("unexpected storage {:?}", other),
        }
    };
    assert_eq!(tracked(&world), vec![0]);

    world
        .set_body_position(ball_body, Isometry::translation(25.0, 0.4, 0.0))
        .unwrap();
    world.step();
    assert_eq!(tracked(&world), vec![1]);

    let contact = world.contact_manager().contact(handle).unwrap();
    assert!(contact.is_overlapping());
    assert!(contact
        .manifolds()
        .iter()
        .flat_map(|m| m.points.iter())
        .all(|p| p.key.triangle == 1));
}
