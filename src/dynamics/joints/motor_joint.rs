use crate::math::{Real, Rotation, Vector};

/// Parameters of a [`MotorJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MotorJointDef {
    /// The target position of the second body, in the local frame of the first one.
    pub linear_offset: Vector<Real>,
    /// The target orientation of the second body relative to the first one.
    pub angular_offset: Rotation<Real>,
    /// The maximum motor force.
    pub max_force: Real,
    /// The maximum motor torque.
    pub max_torque: Real,
    /// The fraction of the position error corrected at each step, in `[0, 1]`.
    pub correction_factor: Real,
}

impl Default for MotorJointDef {
    fn default() -> Self {
        Self {
            linear_offset: Vector::zeros(),
            angular_offset: Rotation::identity(),
            max_force: 1.0,
            max_torque: 1.0,
            correction_factor: 0.3,
        }
    }
}

/// Drives the relative position of two bodies toward a target offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotorJoint {
    /// The parameters of this joint.
    pub def: MotorJointDef,
    /// The accumulated linear impulse.
    pub linear_impulse: Vector<Real>,
    /// The accumulated angular impulse.
    pub angular_impulse: Vector<Real>,
}

impl MotorJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &MotorJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: Vector::zeros(),
            angular_impulse: Vector::zeros(),
        }
    }
}
