use crate::math::{Point, Real, Rotation, Vector};

/// Parameters of a [`PrismaticJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PrismaticJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The sliding axis, in the local frame of the first body.
    pub local_axis_a: Vector<Real>,
    /// The orientation of the second body relative to the first one to maintain.
    pub reference_rotation: Rotation<Real>,
    /// Is the translation limited?
    pub enable_limit: bool,
    /// The lower translation limit.
    pub lower_translation: Real,
    /// The upper translation limit.
    pub upper_translation: Real,
    /// Is the motor enabled?
    pub enable_motor: bool,
    /// The target sliding speed of the motor.
    pub motor_speed: Real,
    /// The maximum force the motor can apply.
    pub max_motor_force: Real,
}

impl Default for PrismaticJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            local_axis_a: Vector::x(),
            reference_rotation: Rotation::identity(),
            enable_limit: false,
            lower_translation: 0.0,
            upper_translation: 0.0,
            enable_motor: false,
            motor_speed: 0.0,
            max_motor_force: 0.0,
        }
    }
}

/// Lets two bodies slide along a shared axis without relative rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrismaticJoint {
    /// The parameters of this joint.
    pub def: PrismaticJointDef,
    /// The accumulated impulses orthogonal to the sliding axis.
    pub linear_impulse: [Real; 2],
    /// The accumulated angular impulse.
    pub angular_impulse: Vector<Real>,
    /// The accumulated translation limit impulse.
    pub limit_impulse: Real,
    /// The accumulated motor impulse.
    pub motor_impulse: Real,
}

impl PrismaticJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &PrismaticJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: [0.0; 2],
            angular_impulse: Vector::zeros(),
            limit_impulse: 0.0,
            motor_impulse: 0.0,
        }
    }
}
