//! Joints between pairs of bodies.

pub use self::cone_joint::{ConeJoint, ConeJointDef};
pub use self::friction_joint::{FrictionJoint, FrictionJointDef};
pub use self::joint::{Joint, JointDef, JointHandle, JointKind, JointParams, JointType};
pub use self::joint_set::JointSet;
pub use self::motor_joint::{MotorJoint, MotorJointDef};
pub use self::mouse_joint::{MouseJoint, MouseJointDef};
pub use self::prismatic_joint::{PrismaticJoint, PrismaticJointDef};
pub use self::revolute_joint::{RevoluteJoint, RevoluteJointDef};
pub use self::sphere_joint::{SphereJoint, SphereJointDef};
pub use self::spring_joint::{SpringJoint, SpringJointDef};
pub use self::weld_joint::{WeldJoint, WeldJointDef};
pub use self::wheel_joint::{WheelJoint, WheelJointDef};

mod cone_joint;
mod friction_joint;
mod joint;
mod joint_set;
mod motor_joint;
mod mouse_joint;
mod prismatic_joint;
mod revolute_joint;
mod sphere_joint;
mod spring_joint;
mod weld_joint;
mod wheel_joint;
