use crate::math::{Point, Real, Vector};

/// Parameters of a [`MouseJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MouseJointDef {
    /// The world-space point the second body is pulled toward.
    pub target: Point<Real>,
    /// The point pulled, in the local frame of the second body.
    pub local_anchor_b: Point<Real>,
    /// The maximum force applied to the second body.
    pub max_force: Real,
    /// The stiffness of the joint, as an oscillation frequency.
    pub frequency_hz: Real,
    /// The damping ratio of the joint: `0` for no damping, `1` for critical damping.
    pub damping_ratio: Real,
}

impl Default for MouseJointDef {
    fn default() -> Self {
        Self {
            target: Point::origin(),
            local_anchor_b: Point::origin(),
            max_force: 0.0,
            frequency_hz: 5.0,
            damping_ratio: 0.7,
        }
    }
}

/// Pulls a point of a body toward a world-space target with a soft constraint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseJoint {
    /// The parameters of this joint.
    pub def: MouseJointDef,
    /// The accumulated linear impulse.
    pub impulse: Vector<Real>,
}

impl MouseJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &MouseJointDef) -> Self {
        Self {
            def: *def,
            impulse: Vector::zeros(),
        }
    }

    /// Moves the target point.
    pub fn set_target(&mut self, target: Point<Real>) {
        self.def.target = target;
    }
}
