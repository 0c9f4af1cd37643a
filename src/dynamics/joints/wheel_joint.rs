use crate::math::{Point, Real, Vector};

/// Parameters of a [`WheelJoint`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct WheelJointDef {
    /// The attachment point on the chassis, in its local frame.
    pub local_anchor_a: Point<Real>,
    /// The center of the wheel, in its local frame.
    pub local_anchor_b: Point<Real>,
    /// The suspension axis, in the local frame of the chassis.
    pub local_axis_a: Vector<Real>,
    /// The spin axis, in the local frame of the wheel.
    pub local_axis_b: Vector<Real>,
    /// The stiffness of the suspension, as an oscillation frequency.
    pub frequency_hz: Real,
    /// The damping ratio of the suspension.
    pub damping_ratio: Real,
    /// Is the motor enabled?
    pub enable_motor: bool,
    /// The target spin speed of the motor.
    pub motor_speed: Real,
    /// The maximum torque the motor can apply.
    pub max_motor_torque: Real,
}

impl Default for WheelJointDef {
    fn default() -> Self {
        Self {
            local_anchor_a: Point::origin(),
            local_anchor_b: Point::origin(),
            local_axis_a: Vector::y(),
            local_axis_b: Vector::x(),
            frequency_hz: 2.0,
            damping_ratio: 0.7,
            enable_motor: false,
            motor_speed: 0.0,
            max_motor_torque: 0.0,
        }
    }
}

/// A wheel attached to a chassis by a spring suspension.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelJoint {
    /// The parameters of this joint.
    pub def: WheelJointDef,
    /// The accumulated impulse keeping the wheel on its suspension line.
    pub impulse: Real,
    /// The accumulated suspension impulse.
    pub spring_impulse: Real,
    /// The accumulated motor impulse.
    pub motor_impulse: Real,
}

impl WheelJoint {
    /// A joint with no accumulated impulse.
    pub fn new(def: &WheelJointDef) -> Self {
        Self {
            def: *def,
            impulse: 0.0,
            spring_impulse: 0.0,
            motor_impulse: 0.0,
        }
    }
}
