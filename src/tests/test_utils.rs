//! Shared helpers for the test suite.

use crate::kinematic_traits::{Joints, Pose};
use crate::parameters::dh_kinematics::{JointKind, Parameters};
use nalgebra::Matrix4;

/// Every built-in robot model.
pub fn all_robots() -> Vec<Parameters> {
    vec![
        Parameters::abb_irb120(),
        Parameters::lr_mate_200id(),
        Parameters::kuka_kr5(),
        Parameters::dobot_cr3(),
        Parameters::puma560(),
    ]
}

/// The textbook Denavit-Hartenberg matrix, written out entry by entry.
/// Deliberately independent of the isometry composition in the crate.
pub fn dh_matrix(theta: f64, d: f64, a: f64, alpha: f64) -> Matrix4<f64> {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    Matrix4::new(
        ct, -st * ca, st * sa, a * ct, //
        st, ct * ca, -ct * sa, a * st, //
        0.0, sa, ca, d, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Flange pose computed by multiplying the textbook matrices.
pub fn reference_pose(parameters: &Parameters, joints: &Joints) -> Matrix4<f64> {
    let mut pose = Matrix4::identity();
    for (k, link) in parameters.links.iter().enumerate() {
        let (theta, d) = match link.kind {
            JointKind::Revolute => (joints[k] + link.offset, link.d),
            JointKind::Prismatic => (link.offset, link.d + joints[k]),
        };
        pose *= dh_matrix(theta, d, link.a, link.alpha);
    }
    pose
}

pub fn assert_translation(pose: &Pose, x: f64, y: f64, z: f64, tolerance: f64) {
    let t = pose.translation.vector;
    assert!(
        (t.x - x).abs() < tolerance && (t.y - y).abs() < tolerance && (t.z - z).abs() < tolerance,
        "translation [{}, {}, {}] is not at [{}, {}, {}]",
        t.x,
        t.y,
        t.z,
        x,
        y,
        z
    );
}
