use crate::math::{Point, Real, Vector};

/// Parameters of a [`FrictionJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FrictionJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The maximum friction force.
    pub max_force: Real,
    /// The maximum friction torque.
    pub max_torque: Real,
}

impl Default for FrictionJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            max_force: 0.0,
            max_torque: 0.0,
        }
    }
}

/// Resists the relative motion of two bodies, like a top-down friction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrictionJoint {
    /// The parameters of this joint.
    pub def: FrictionJointDef,
    /// The accumulated linear impulse.
    pub linear_impulse: Vector<Real>,
    /// The accumulated angular impulse.
    pub angular_impulse: Vector<Real>,
}

impl FrictionJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &FrictionJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: Vector::zeros(),
            angular_impulse: Vector::zeros(),
        }
    }
}
