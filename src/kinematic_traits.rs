//! Defines the kinematic traits and the fixed-size joint/pose types used
//! throughout the crate.

extern crate nalgebra as na;

use na::Isometry3;

/// Pose of the robot tcp. It contains both the Cartesian position and the
/// rotation quaternion.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Six joint positions (radians for revolute joints, meters for prismatic ones),
/// base to flange.
pub type Joints = [f64; 6];

/// The inverse kinematics may return multiple solutions, each defining the
/// positions of the 6 joints. Solutions are sorted best (closest to the previous
/// joint positions) first.
pub type Solutions = Vec<Joints>;

/// All joints at zero, the usual seed when no previous position is known.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

pub const J1: usize = 0;
pub const J2: usize = 1;
pub const J3: usize = 2;
pub const J4: usize = 3;
pub const J5: usize = 4;
pub const J6: usize = 5;

/// Index of the attached tool in structures that address joints and accessories
/// by a single index.
pub const J_TOOL: usize = 6;

/// Index of the robot base in structures that address joints and accessories
/// by a single index.
pub const J_BASE: usize = 7;

/// Kinematic singularities the solver can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// The axes of J4 and J6 coincide (J5 folded flat), so their rotations add up
    /// and individual values cannot be recovered from the pose alone.
    Aligned,
}

pub trait Kinematics {
    /// Find inverse kinematics (joint positions) for this pose. Solutions are not
    /// sorted towards any specific previous position.
    fn inverse(&self, pose: &Pose) -> Solutions;

    /// Find inverse kinematics (joint positions) for this pose, assuming the
    /// robot arrives from the given previous position. Solutions are sorted by
    /// proximity to it, closest first.
    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions;

    /// Find forward kinematics (pose from joint positions).
    fn forward(&self, qs: &Joints) -> Pose;

    /// Calculates the pose of every joint frame, base to flange. The last entry
    /// equals [Kinematics::forward]. This is typically used for rendering the
    /// arm or inspecting intermediate links.
    fn forward_with_joint_poses(&self, joints: &Joints) -> [Pose; 6];

    /// Detect a kinematic singularity. Returns None if no singularity is
    /// recognized at this position.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
