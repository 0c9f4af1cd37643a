use crate::math::{Point, Real, Vector};

/// Parameters of a [`SphereJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SphereJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
}

impl Default for SphereJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
        }
    }
}

/// A ball-and-socket joint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereJoint {
    /// The parameters of this joint.
    pub def: SphereJointDef,
    /// The accumulated point-to-point impulse.
    pub impulse: Vector<Real>,
}

impl SphereJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &SphereJointDef) -> Self {
        Self {
            def: *def,
            impulse: Vector::zeros(),
        }
    }
}
