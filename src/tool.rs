//! Provides tool and base for the robot.
//! Both Tool and Base take arbitrary implementation of Kinematics and are such
//! implementations themselves. Hence, they can be cascaded, like base, having the robot,
//! that robot having a tool:
//! ```
//! use std::sync::Arc;
//! use nalgebra::{Isometry3, Translation3, UnitQuaternion};
//! use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
//! use rs_dh_kinematics::kinematics_impl::DHKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//! let robot_alone = DHKinematics::new(Parameters::abb_irb120());
//!
//! // Half meter high pedestal
//! let pedestal = 0.5;
//! let base_translation = Isometry3::from_parts(
//!   Translation3::new(0.0, 0.0, pedestal).into(),
//!   UnitQuaternion::identity(),
//! );
//!
//! let robot_with_base = rs_dh_kinematics::tool::Base {
//!   robot: Arc::new(robot_alone),
//!   base: base_translation,
//! };
//!
//! // Tool extends 0.15 meter in the Z direction, envisioning a marker pen
//! let pen = 0.15;
//! let tool_translation = Isometry3::from_parts(
//!   Translation3::new(0.0, 0.0, pen).into(),
//!   UnitQuaternion::identity(),
//! );
//!
//! // Create the Tool instance with the transformation
//! let robot_complete = rs_dh_kinematics::tool::Tool {
//!   robot: Arc::new(robot_with_base),
//!   tool: tool_translation,
//! };
//!
//! let joints: Joints = [0.0, 0.1, 0.2, 0.3, 0.0, 0.5]; // Joints are alias of [f64; 6]
//! let tcp_pose: Pose = robot_complete.forward(&joints);
//! println!("The pen tip is at: {:?}", tcp_pose);
//! ```

extern crate nalgebra as na;

use crate::kinematic_traits::{Joints, Kinematics, Pose, Singularity, Solutions};
use na::Isometry3;
use std::sync::Arc;

/// Defines the fixed tool that can be attached to the last joint (joint 6) of robot.
/// The tool moves with the robot, providing additional translation and, if needed,
/// rotation. The tool itself fully implements the Kinematics, with "pose" being
/// assumed as the position and rotation of the tip of the tool (tool center point).
#[derive(Clone)]
pub struct Tool {
    pub robot: Arc<dyn Kinematics>, // The robot

    /// Transformation from the robot's tip joint to the tool's TCP.
    pub tool: Isometry3<f64>,
}

/// Defines the fixed base that can hold the robot.
/// The base moves the robot to its installed location, providing also rotation if
/// required (physical robots work well and may be installed upside down, or at some
/// angle like 45 degrees). Base itself fully implements the Kinematics,
/// providing both inverse and forward kinematics for the robot on a base.
#[derive(Clone)]
pub struct Base {
    pub robot: Arc<dyn Kinematics>, // The robot

    /// Transformation from the world origin to the robots base.
    pub base: Isometry3<f64>,
}

impl Kinematics for Tool {
    fn inverse(&self, tcp: &Pose) -> Solutions {
        self.robot.inverse(&(tcp * self.tool.inverse()))
    }

    fn inverse_continuing(&self, tcp: &Pose, previous: &Joints) -> Solutions {
        self.robot
            .inverse_continuing(&(tcp * self.tool.inverse()), previous)
    }

    fn forward(&self, qs: &Joints) -> Pose {
        // Calculate the pose of the tip joint using the robot's kinematics
        let tip_joint = self.robot.forward(qs);
        tip_joint * self.tool
    }

    fn forward_with_joint_poses(&self, joints: &Joints) -> [Pose; 6] {
        let mut poses = self.robot.forward_with_joint_poses(joints);
        // The last frame is the tool center point rather than the flange.
        poses[5] *= self.tool;
        poses
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        self.robot.kinematic_singularity(qs)
    }
}

impl Kinematics for Base {
    fn inverse(&self, tcp: &Pose) -> Solutions {
        self.robot.inverse(&(self.base.inverse() * tcp))
    }

    fn inverse_continuing(&self, tcp: &Pose, previous: &Joints) -> Solutions {
        self.robot
            .inverse_continuing(&(self.base.inverse() * tcp), previous)
    }

    fn forward(&self, joints: &Joints) -> Pose {
        self.base * self.robot.forward(joints)
    }

    fn forward_with_joint_poses(&self, joints: &Joints) -> [Pose; 6] {
        self.robot
            .forward_with_joint_poses(joints)
            .map(|pose| self.base * pose)
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        self.robot.kinematic_singularity(qs)
    }
}
