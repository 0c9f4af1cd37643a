use rebound3d::dynamics::{
    ColliderDesc, ColliderShape, JointDef, JointKind, JointParams, JointType, RigidBodyDesc,
    World, WorldError, WheelJointDef,
};
use rebound3d::math::{Point, Vector};

#[test]
fn every_joint_type_round_trips() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic());
    let baseline = world.joints().outstanding_blocks();

    let mut handles = Vec::new();
    for joint_type in JointType::ALL {
        let def = JointDef::new(a, b, JointParams::default_for(joint_type));
        let handle = world.insert_joint(def).unwrap();
        let joint = world.joints().get(handle).unwrap();
        assert_eq!(joint.joint_type(), joint_type);
        assert_eq!(
            world.joints().allocator().block_size(handle.block()),
            Some(joint_type.block_size())
        );
        handles.push(handle);
    }

    assert_eq!(world.joints().len(), JointType::ALL.len());
    assert_eq!(world.bodies()[a].joint_edges().len(), JointType::ALL.len());
    assert_eq!(world.bodies()[b].joint_edges().len(), JointType::ALL.len());

    // Remove in an order unrelated to the insertion order.
    handles.reverse();
    handles.swap(0, 4);
    for handle in handles {
        world.remove_joint(handle).unwrap();
    }

    assert_eq!(world.joints().outstanding_blocks(), baseline);
    assert!(world.bodies()[a].joint_edges().is_empty());
    assert!(world.bodies()[b].joint_edges().is_empty());
}

#[test]
fn joint_parameters_are_kept() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic());
    let params = WheelJointDef {
        local_anchor_a: Point::new(0.0, -0.5, 0.0),
        local_axis_a: Vector::y(),
        frequency_hz: 4.0,
        damping_ratio: 0.7,
        ..WheelJointDef::default()
    };
    let handle = world.insert_joint(JointDef::new(a, b, params)).unwrap();

    match world.joints().get(handle).unwrap().kind() {
        JointKind::Wheel(wheel) => {
            assert_eq!(wheel.def, params);
            assert_eq!(wheel.motor_impulse, 0.0);
        }
        other => panic!("unexpected joint {:?}", other),
    }
}

#[test]
fn invalid_joints_are_rejected() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic());
    world.remove_body(b).unwrap();

    let params = JointParams::default_for(JointType::Weld);
    assert_eq!(
        world.insert_joint(JointDef::new(a, b, params)),
        Err(WorldError::InvalidBody(b))
    );
    assert_eq!(
        world.insert_joint(JointDef::new(a, a, params)),
        Err(WorldError::SelfJoint(a))
    );
    assert!(world.joints().is_empty());
}

#[test]
fn joints_can_disable_collisions() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.9, 0.0, 0.0)));
    let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
    let _ = world.insert_collider(ball(), a).unwrap();
    let _ = world.insert_collider(ball(), b).unwrap();

    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);

    // The existing contact is destroyed by the next update.
    let params = JointParams::default_for(JointType::Revolute);
    let joint = world.insert_joint(JointDef::new(a, b, params)).unwrap();
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 0);

    // Removing the joint lets the broad-phase report the pair again.
    world.remove_joint(joint).unwrap();
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
}

#[test]
fn connected_bodies_can_collide() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.9, 0.0, 0.0)));
    let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
    let _ = world.insert_collider(ball(), a).unwrap();
    let _ = world.insert_collider(ball(), b).unwrap();

    let params = JointParams::default_for(JointType::Spring);
    let _ = world
        .insert_joint(JointDef::new(a, b, params).collide_connected(true))
        .unwrap();
    world.step();
    assert_eq!(world.contact_manager().contact_count(), 1);
}

#[test]
fn removing_a_body_removes_its_joints_and_contacts() {
    let mut world = World::default();
    let a = world.insert_body(RigidBodyDesc::dynamic());
    let b = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(0.9, 0.0, 0.0)));
    let c = world.insert_body(RigidBodyDesc::dynamic().translation(Vector::new(-0.9, 0.0, 0.0)));
    let ball = || ColliderDesc::new(ColliderShape::ball(0.5));
    for body in [a, b, c] {
        let _ = world.insert_collider(ball(), body).unwrap();
    }
    let params = JointParams::default_for(JointType::Motor);
    let _ = world.insert_joint(JointDef::new(a, b, params)).unwrap();

    world.step();
    // a-c only: a-b is disabled by the joint.
    assert_eq!(world.contact_manager().contact_count(), 1);

    world.remove_body(a).unwrap();
    assert!(world.joints().is_empty());
    assert!(world.bodies()[b].joint_edges().is_empty());
    assert_eq!(world.contact_manager().contact_count(), 0);
    assert_eq!(world.colliders().len(), 2);
    assert_eq!(world.remove_body(a), Err(WorldError::InvalidBody(a)));
}
