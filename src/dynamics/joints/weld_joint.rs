use crate::math::{Point, Real, Rotation, Vector};

/// Parameters of a [`WeldJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WeldJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The orientation of the second body relative to the first one to maintain.
    pub reference_rotation: Rotation<Real>,
    /// The angular stiffness, as an oscillation frequency. Zero makes the weld rigid.
    pub frequency_hz: Real,
    /// The angular damping ratio.
    pub damping_ratio: Real,
}

impl Default for WeldJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            reference_rotation: Rotation::identity(),
            frequency_hz: 0.0,
            damping_ratio: 0.0,
        }
    }
}

/// Glues two bodies together.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeldJoint {
    /// The parameters of this joint.
    pub def: WeldJointDef,
    /// The accumulated linear impulse.
    pub linear_impulse: Vector<Real>,
    /// The accumulated angular impulse.
    pub angular_impulse: Vector<Real>,
}

impl WeldJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &WeldJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: Vector::zeros(),
            angular_impulse: Vector::zeros(),
        }
    }
}
