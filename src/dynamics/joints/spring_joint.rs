use crate::math::{Point, Real};

/// Parameters of a [`SpringJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SpringJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The rest length of the spring.
    pub length: Real,
    /// The stiffness of the spring, as an oscillation frequency. Zero makes the spring rigid.
    pub frequency_hz: Real,
    /// The damping ratio of the spring.
    pub damping_ratio: Real,
}

impl Default for SpringJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            length: 0.0,
            frequency_hz: 0.0,
            damping_ratio: 0.0,
        }
    }
}

/// Keeps two anchor points at a given distance, rigidly or softly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringJoint {
    /// The parameters of this joint.
    pub def: SpringJointDef,
    /// The accumulated impulse along the spring axis.
    pub impulse: Real,
}

impl SpringJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &SpringJointDef) -> Self {
        Self {
            def: *def,
            impulse: 0.0,
        }
    }
}
