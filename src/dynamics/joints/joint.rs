use super::{
    ConeJoint, ConeJointDef, FrictionJoint, FrictionJointDef, MotorJoint, MotorJointDef,
    MouseJoint, MouseJointDef, PrismaticJoint, PrismaticJointDef, RevoluteJoint,
    RevoluteJointDef, SphereJoint, SphereJointDef, SpringJoint, SpringJointDef, WeldJoint,
    WeldJointDef, WheelJoint, WheelJointDef,
};
use crate::dynamics::BodyHandle;
use crate::utils::{BlockAllocator, BlockHandle};
use std::mem::size_of;

/// The handle of a joint inserted into a [`super::JointSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct JointHandle(pub(crate) BlockHandle);

impl JointHandle {
    /// The block of the joint allocator holding this joint.
    pub fn block(self) -> BlockHandle {
        self.0
    }
}

/// The type of a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum JointType {
    /// A [`MouseJoint`].
    Mouse,
    /// A [`SpringJoint`].
    Spring,
    /// A [`WeldJoint`].
    Weld,
    /// A [`RevoluteJoint`].
    Revolute,
    /// A [`SphereJoint`].
    Sphere,
    /// A [`ConeJoint`].
    Cone,
    /// A [`FrictionJoint`].
    Friction,
    /// A [`MotorJoint`].
    Motor,
    /// A [`PrismaticJoint`].
    Prismatic,
    /// A [`WheelJoint`].
    Wheel,
}

impl JointType {
    /// All the joint types.
    pub const ALL: [JointType; 10] = [
        JointType::Mouse,
        JointType::Spring,
        JointType::Weld,
        JointType::Revolute,
        JointType::Sphere,
        JointType::Cone,
        JointType::Friction,
        JointType::Motor,
        JointType::Prismatic,
        JointType::Wheel,
    ];

    /// The size of the block allocated for joints of this type: the common part of all joints
    /// plus the state of this joint type.
    pub fn block_size(self) -> usize {
        let header = size_of::<Joint>() - size_of::<JointKind>();
        let variant = match self {
            JointType::Mouse => size_of::<MouseJoint>(),
            JointType::Spring => size_of::<SpringJoint>(),
            JointType::Weld => size_of::<WeldJoint>(),
            JointType::Revolute => size_of::<RevoluteJoint>(),
            JointType::Sphere => size_of::<SphereJoint>(),
            JointType::Cone => size_of::<ConeJoint>(),
            JointType::Friction => size_of::<FrictionJoint>(),
            JointType::Motor => size_of::<MotorJoint>(),
            JointType::Prismatic => size_of::<PrismaticJoint>(),
            JointType::Wheel => size_of::<WheelJoint>(),
        };
        header + variant
    }
}

/// The parameters specific to each joint type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum JointParams {
    /// Parameters of a mouse joint.
    Mouse(MouseJointDef),
    /// Parameters of a spring joint.
    Spring(SpringJointDef),
    /// Parameters of a weld joint.
    Weld(WeldJointDef),
    /// Parameters of a revolute joint.
    Revolute(RevoluteJointDef),
    /// Parameters of a sphere joint.
    Sphere(SphereJointDef),
    /// Parameters of a cone joint.
    Cone(ConeJointDef),
    /// Parameters of a friction joint.
    Friction(FrictionJointDef),
    /// Parameters of a motor joint.
    Motor(MotorJointDef),
    /// Parameters of a prismatic joint.
    Prismatic(PrismaticJointDef),
    /// Parameters of a wheel joint.
    Wheel(WheelJointDef),
}

impl JointParams {
    /// The type of the joint these parameters describe.
    pub fn joint_type(&self) -> JointType {
        match self {
            JointParams::Mouse(_) => JointType::Mouse,
            JointParams::Spring(_) => JointType::Spring,
            JointParams::Weld(_) => JointType::Weld,
            JointParams::Revolute(_) => JointType::Revolute,
            JointParams::Sphere(_) => JointType::Sphere,
            JointParams::Cone(_) => JointType::Cone,
            JointParams::Friction(_) => JointType::Friction,
            JointParams::Motor(_) => JointType::Motor,
            JointParams::Prismatic(_) => JointType::Prismatic,
            JointParams::Wheel(_) => JointType::Wheel,
        }
    }

    /// The default parameters of a joint type.
    pub fn default_for(joint_type: JointType) -> Self {
        match joint_type {
            JointType::Mouse => MouseJointDef::default().into(),
            JointType::Spring => SpringJointDef::default().into(),
            JointType::Weld => WeldJointDef::default().into(),
            JointType::Revolute => RevoluteJointDef::default().into(),
            JointType::Sphere => SphereJointDef::default().into(),
            JointType::Cone => ConeJointDef::default().into(),
            JointType::Friction => FrictionJointDef::default().into(),
            JointType::Motor => MotorJointDef::default().into(),
            JointType::Prismatic => PrismaticJointDef::default().into(),
            JointType::Wheel => WheelJointDef::default().into(),
        }
    }
}

macro_rules! impl_from_joint_def(
    ($($Def: ident => $Variant: ident),*) => {$(
        impl From<$Def> for JointParams {
            fn from(def: $Def) -> Self {
                JointParams::$Variant(def)
            }
        }
    )*}
);

impl_from_joint_def!(
    MouseJointDef => Mouse,
    SpringJointDef => Spring,
    WeldJointDef => Weld,
    RevoluteJointDef => Revolute,
    SphereJointDef => Sphere,
    ConeJointDef => Cone,
    FrictionJointDef => Friction,
    MotorJointDef => Motor,
    PrismaticJointDef => Prismatic,
    WheelJointDef => Wheel
);

/// The description of a joint to create.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointDef {
    /// The first body attached to the joint.
    pub body_a: BodyHandle,
    /// The second body attached to the joint.
    pub body_b: BodyHandle,
    /// Can the colliders of the two bodies touch each other?
    pub collide_connected: bool,
    /// Arbitrary data attached to the joint.
    pub user_data: u128,
    /// The parameters specific to the joint type.
    pub params: JointParams,
}

impl JointDef {
    /// A joint between `body_a` and `body_b` whose colliders won't collide with each other.
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, params: impl Into<JointParams>) -> Self {
        Self {
            body_a,
            body_b,
            collide_connected: false,
            user_data: 0,
            params: params.into(),
        }
    }

    /// Sets whether the colliders of the two bodies can touch each other.
    pub fn collide_connected(mut self, collide_connected: bool) -> Self {
        self.collide_connected = collide_connected;
        self
    }

    /// Sets the user data of the joint.
    pub fn user_data(mut self, user_data: u128) -> Self {
        self.user_data = user_data;
        self
    }

    /// The type of the joint to create.
    pub fn joint_type(&self) -> JointType {
        self.params.joint_type()
    }
}

/// The state of a joint, specific to its type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JointKind {
    /// A mouse joint.
    Mouse(MouseJoint),
    /// A spring joint.
    Spring(SpringJoint),
    /// A weld joint.
    Weld(WeldJoint),
    /// A revolute joint.
    Revolute(RevoluteJoint),
    /// A sphere joint.
    Sphere(SphereJoint),
    /// A cone joint.
    Cone(ConeJoint),
    /// A friction joint.
    Friction(FrictionJoint),
    /// A motor joint.
    Motor(MotorJoint),
    /// A prismatic joint.
    Prismatic(PrismaticJoint),
    /// A wheel joint.
    Wheel(WheelJoint),
}

/// A constraint between two bodies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Joint {
    joint_type: JointType,
    body_a: BodyHandle,
    body_b: BodyHandle,
    collide_connected: bool,
    /// Arbitrary data attached to the joint.
    pub user_data: u128,
    kind: JointKind,
}

impl Joint {
    /// Builds a joint from its description.
    pub fn new(def: &JointDef) -> Self {
        let kind = match &def.params {
            JointParams::Mouse(p) => JointKind::Mouse(MouseJoint::new(p)),
            JointParams::Spring(p) => JointKind::Spring(SpringJoint::new(p)),
            JointParams::Weld(p) => JointKind::Weld(WeldJoint::new(p)),
            JointParams::Revolute(p) => JointKind::Revolute(RevoluteJoint::new(p)),
            JointParams::Sphere(p) => JointKind::Sphere(SphereJoint::new(p)),
            JointParams::Cone(p) => JointKind::Cone(ConeJoint::new(p)),
            JointParams::Friction(p) => JointKind::Friction(FrictionJoint::new(p)),
            JointParams::Motor(p) => JointKind::Motor(MotorJoint::new(p)),
            JointParams::Prismatic(p) => JointKind::Prismatic(PrismaticJoint::new(p)),
            JointParams::Wheel(p) => JointKind::Wheel(WheelJoint::new(p)),
        };

        Self {
            joint_type: def.joint_type(),
            body_a: def.body_a,
            body_b: def.body_b,
            collide_connected: def.collide_connected,
            user_data: def.user_data,
            kind,
        }
    }

    /// Builds a joint from its description and stores it in `allocator`.
    pub fn create(def: &JointDef, allocator: &mut BlockAllocator<Joint>) -> JointHandle {
        let joint_type = def.joint_type();
        let handle = JointHandle(allocator.allocate(joint_type.block_size(), Joint::new(def)));
        log::trace!("Created the joint {:?} of type {:?}.", handle, joint_type);
        handle
    }

    /// Removes a joint from `allocator`, giving back its block.
    pub fn destroy(handle: JointHandle, allocator: &mut BlockAllocator<Joint>) -> Joint {
        let joint_type = allocator[handle.0].joint_type;
        log::trace!("Destroying the joint {:?} of type {:?}.", handle, joint_type);
        allocator.free(handle.0, joint_type.block_size())
    }

    /// The type of this joint.
    #[inline]
    pub fn joint_type(&self) -> JointType {
        self.joint_type
    }

    /// The first body attached to this joint.
    #[inline]
    pub fn body_a(&self) -> BodyHandle {
        self.body_a
    }

    /// The second body attached to this joint.
    #[inline]
    pub fn body_b(&self) -> BodyHandle {
        self.body_b
    }

    /// Can the colliders of the two bodies touch each other?
    #[inline]
    pub fn collide_connected(&self) -> bool {
        self.collide_connected
    }

    /// The state specific to the type of this joint.
    #[inline]
    pub fn kind(&self) -> &JointKind {
        &self.kind
    }

    /// The state specific to the type of this joint.
    #[inline]
    pub fn kind_mut(&mut self) -> &mut JointKind {
        &mut self.kind
    }
}
