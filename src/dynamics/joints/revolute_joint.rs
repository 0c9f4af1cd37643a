use crate::math::{Point, Real, Rotation, Vector};

/// Parameters of a [`RevoluteJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RevoluteJointDef {
    /// The hinge point on the first body, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The hinge point on the second body, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The hinge axis, in the local frame of the first body.
    pub local_axis_a: Vector<Real>,
    /// The orientation of the second body relative to the first one at angle zero.
    pub reference_rotation: Rotation<Real>,
    /// Is the rotation angle limited?
    pub enable_limit: bool,
    /// The lower angle limit, in radians.
    pub lower_angle: Real,
    /// The upper angle limit, in radians.
    pub upper_angle: Real,
    /// Is the motor enabled?
    pub enable_motor: bool,
    /// The target angular speed of the motor.
    pub motor_speed: Real,
    /// The maximum torque the motor can apply.
    pub max_motor_torque: Real,
}

impl Default for RevoluteJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            local_axis_a: Vector::z(),
            reference_rotation: Rotation::identity(),
            enable_limit: false,
            lower_angle: 0.0,
            upper_angle: 0.0,
            enable_motor: false,
            motor_speed: 0.0,
            max_motor_torque: 0.0,
        }
    }
}

/// Lets two bodies rotate about a shared hinge axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevoluteJoint {
    /// The parameters of this joint.
    pub def: RevoluteJointDef,
    /// The accumulated point-to-point impulse.
    pub linear_impulse: Vector<Real>,
    /// The accumulated impulses keeping the two hinge axes aligned.
    pub angular_impulse: [Real; 2],
    /// The accumulated angle limit impulse.
    pub limit_impulse: Real,
    /// The accumulated motor impulse.
    pub motor_impulse: Real,
}

impl RevoluteJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &RevoluteJointDef) -> Self {
        Self {
            def: *def,
            linear_impulse: Vector::zeros(),
            angular_impulse: [0.0; 2],
            limit_impulse: 0.0,
            motor_impulse: 0.0,
        }
    }

    /// Enables or disables the motor. Disabling it resets its impulse.
    pub fn enable_motor(&mut self, enabled: bool) {
        self.def.enable_motor = enabled;
        if !enabled {
            self.motor_impulse = 0.0;
        }
    }
}
