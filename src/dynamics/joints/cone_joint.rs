use crate::math::{Point, Real, Vector};

/// Parameters of a [`ConeJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ConeJointDef {
    /// The attachment point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The attachment point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The cone axis, in the local frame of the first body.
    pub local_axis_a: Vector<Real>,
    /// The twist axis, in the local frame of the second body.
    pub local_axis_b: Vector<Real>,
    /// Is the swing of the second axis limited to a cone?
    pub enable_cone_limit: bool,
    /// The half-angle of the cone, in radians.
    pub cone_angle: Real,
    /// Is the twist about the second axis limited?
    pub enable_twist_limit: bool,
    /// The lower twist limit, in radians.
    pub lower_twist: Real,
    /// The upper twist limit, in radians.
    pub upper_twist: Real,
}

impl Default for ConeJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            local_axis_a: Vector::y(),
            local_axis_b: Vector::y(),
            enable_cone_limit: false,
            cone_angle: 0.0,
            enable_twist_limit: false,
            lower_twist: 0.0,
            upper_twist: 0.0,
        }
    }
}

/// A ball-and-socket joint whose swing and twist can be limited.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConeJoint {
    /// The parameters of this joint.
    pub def: ConeJointDef,
    /// The accumulated point-to-point impulse.
    pub linear_impulse: Vector<Real>,
    /// The accumulated cone limit impulse.
    pub cone_impulse: Real,
    /// The accumulated twist limit impulse.
    pub twist_impulse: Real,
}

impl ConeJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &ConeJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: Vector::zeros(),
            cone_impulse: 0.0,
            twist_impulse: 0.0,
        }
    }
}
