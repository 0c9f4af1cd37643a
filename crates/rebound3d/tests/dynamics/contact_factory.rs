use crate::common::assert_graph_is_consistent;
use rebound3d::dynamics::{
    ColliderDesc, ColliderHandle, ColliderShape, ContactKind, ContactStorage, ContactType,
    RigidBodyDesc, ShapeType, World,
};
use rebound3d::math::{Point, Vector};

fn shape(shape_type: ShapeType) -> ColliderShape {
    match shape_type {
        ShapeType::Sphere => ColliderShape::ball(0.5),
        ShapeType::Capsule => ColliderShape::capsule_y(0.5, 0.25),
        ShapeType::Hull => ColliderShape::convex_hull(&[
            Point::new(-0.5, -0.5, -0.5),
            Point::new(0.5, -0.5, -0.5),
            Point::new(0.0, -0.5, 0.5),
            Point::new(0.0, 0.5, 0.0),
        ])
        .unwrap(),
        ShapeType::Triangle => ColliderShape::triangle(
            Point::new(-1.0, 0.0, -1.0),
            Point::new(1.0, 0.0, -1.0),
            Point::new(0.0, 0.0, 1.0),
        ),
        ShapeType::Mesh => ColliderShape::mesh(
            vec![
                Point::new(-2.0, 0.0, -2.0),
                Point::new(2.0, 0.0, -2.0),
                Point::new(2.0, 0.0, 2.0),
                Point::new(-2.0, 0.0, 2.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap(),
    }
}

const SHAPE_TYPES: [ShapeType; 5] = [
    ShapeType::Sphere,
    ShapeType::Capsule,
    ShapeType::Hull,
    ShapeType::Triangle,
    ShapeType::Mesh,
];

fn insert(world: &mut World, shape_type: ShapeType) -> ColliderHandle {
    let body = world.insert_body(RigidBodyDesc::dynamic());
    world
        .insert_collider(ColliderDesc::new(shape(shape_type)), body)
        .unwrap()
}

#[test]
fn every_shape_pair_round_trips() {
    let mut world = World::default();
    let baseline = world.contact_manager().allocator().outstanding();
    let mut created = Vec::new();

    for type_a in SHAPE_TYPES {
        for type_b in SHAPE_TYPES {
            let a = insert(&mut world, type_a);
            let b = insert(&mut world, type_b);
            let handle = world.add_pair(a, b);

            match ContactType::for_shapes(type_a, type_b) {
                Some((contact_type, swapped)) => {
                    let handle = handle.expect("the pair should be collidable");
                    let contact = world.contact_manager().contact(handle).unwrap();
                    assert_eq!(contact.contact_type(), contact_type);
                    let expected = if swapped { (b, a) } else { (a, b) };
                    assert_eq!((contact.collider_a(), contact.collider_b()), expected);
                    assert_eq!(
                        world.contact_manager().allocator().block_size(handle.block()),
                        Some(contact_type.block_size())
                    );
                    created.push((a, b));
                }
                None => assert!(handle.is_none(), "{:?} vs {:?}", type_a, type_b),
            }
        }
    }

    assert_eq!(created.len(), 21);
    assert_eq!(world.contact_manager().contact_count(), created.len());
    assert_graph_is_consistent(&world);

    for (a, b) in created {
        world.remove_collider(a).unwrap();
        world.remove_collider(b).unwrap();
    }

    assert_eq!(world.contact_manager().contact_count(), 0);
    assert_eq!(world.contact_manager().allocator().outstanding(), baseline);
    for class in world.contact_manager().allocator().size_classes() {
        assert_eq!(class.outstanding, 0);
        assert_eq!(class.allocations, class.frees);
    }
}

#[test]
fn mesh_contacts_track_triangles() {
    let mut world = World::default();
    let mesh = insert(&mut world, ShapeType::Mesh);
    let body = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.0, 0.3, 0.0)));
    let ball = world
        .insert_collider(ColliderDesc::new(shape(ShapeType::Sphere)), body)
        .unwrap();
    let handle = world.add_pair(ball, mesh).unwrap();

    let contact = world.contact_manager().contact(handle).unwrap();
    assert_eq!(contact.collider_a(), mesh);
    assert_eq!(contact.contact_type().storage(), ContactStorage::Mesh);

    // The ball sits on the diagonal shared by the two triangles.
    world.step();
    let contact = world.contact_manager().contact(handle).unwrap();
    match contact.kind() {
        ContactKind::Mesh(mesh_contact) => {
            let indices: Vec<_> = mesh_contact.triangles().iter().map(|t| t.index).collect();
            assert_eq!(indices, vec![0, 1]);
        }
        other => panic!("unexpected storage {:?}", other),
    }
    assert!(contact.is_overlapping());
}
