//! Helper functions

use crate::kinematic_traits::{Joints, Pose, Solutions};
use nalgebra::{
    Isometry3, Matrix3, Rotation3, Translation3, UnitQuaternion, Vector3, Vector6,
};

/// Convert array of f32's in degrees to Joints
/// that are array of f64's in radians
pub fn joints(angles: &[f32; 6]) -> Joints {
    std::array::from_fn(|i| (angles[i] as f64).to_radians())
}

/// Convert joints that are array of f64's in radians to
/// array of f32's in degrees
pub fn to_degrees(angles: &Joints) -> [f32; 6] {
    std::array::from_fn(|i| angles[i].to_degrees() as f32)
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [f64; 6]) -> Joints {
    std::array::from_fn(|i| degrees[i].to_radians())
}

/// Print joint values for all solutions, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_solutions(solutions: &Solutions) {
    if solutions.is_empty() {
        println!("No solutions");
    }
    for sol in solutions {
        dump_joints(sol);
    }
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..6 {
        row_str.push_str(&format!("{:7.2} ", joints[joint_idx].to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Print the Cartesian position and the rotation quaternion of the pose.
pub fn dump_pose(isometry: &Isometry3<f64>) {
    let translation = isometry.translation.vector;
    let rotation: UnitQuaternion<f64> = isometry.rotation;
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

/// Converts ```nalgebra::Vector6<f64>``` to Joints ([f64; 6])
pub fn vector6_to_joints(v: Vector6<f64>) -> Joints {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Converts ```Joints ([f64; 6])``` to a ```Vector6<f64>```
pub fn joints_to_vector6(j: Joints) -> Vector6<f64> {
    Vector6::new(j[0], j[1], j[2], j[3], j[4], j[5])
}

/// Calculates the transition cost between two sets of joint positions,
/// weighted by the given coefficients (rotating heavy base joints is
/// more expensive). This function returns the maximum weighted rotation.
pub fn transition_costs(from: &Joints, to: &Joints, coefficients: &Joints) -> f64 {
    (0..6)
        .map(|i| (from[i] - to[i]).abs() * coefficients[i])
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Builds the rotation from the orientation (y) and approach (z) vectors of the
/// end effector. The normal (x) is their cross product. Vectors do not need to
/// be normalized but must not be parallel.
pub fn rotation_from_oa(orientation: Vector3<f64>, approach: Vector3<f64>) -> UnitQuaternion<f64> {
    let a = approach.normalize();
    let n = orientation.cross(&approach).normalize();
    let o = a.cross(&n);
    let matrix = Matrix3::from_columns(&[n, o, a]);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(matrix))
}

/// Pose from the Cartesian position and the orientation/approach vector pair.
pub fn pose_from_oa(
    x: f64,
    y: f64,
    z: f64,
    orientation: Vector3<f64>,
    approach: Vector3<f64>,
) -> Pose {
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        rotation_from_oa(orientation, approach),
    )
}

/// Pose from the Cartesian position and roll/pitch/yaw angles in radians
/// (rotations about the fixed x, y and z axes, applied in that order).
pub fn pose_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Pose {
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// Compares two poses, panicking with both printed when they differ more than
/// the tolerances allow. Intended for tests and demos.
pub fn assert_pose_eq(
    ta: &Isometry3<f64>,
    tb: &Isometry3<f64>,
    distance_tolerance: f64,
    angular_tolerance: f64,
) -> bool {
    fn bad(ta: &Isometry3<f64>, tb: &Isometry3<f64>) {
        dump_pose(ta);
        dump_pose(tb);
    }

    let translation_distance = (ta.translation.vector - tb.translation.vector).norm();
    let angular_distance = ta.rotation.angle_to(&tb.rotation);

    if translation_distance.abs() > distance_tolerance {
        bad(ta, tb);
        panic!("Poses have too different translations");
    }

    if angular_distance.abs() > angular_tolerance {
        bad(ta, tb);
        panic!("Poses have too different angles");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_degree_radian_roundtrip() {
        let degrees = [30.0, -45.0, 60.0, -30.0, 45.0, 90.0];
        let rad = as_radians(degrees);
        assert!((rad[0] - PI / 6.0).abs() < 1e-12);
        let back = to_degrees(&rad);
        for i in 0..6 {
            assert!((back[i] as f64 - degrees[i]).abs() < 1e-4);
        }
    }

    #[test]
    fn test_transition_costs_weighted() {
        let from = [0.0; 6];
        let to = [0.1, 0.0, 0.0, 0.0, 0.0, 1.0];
        let coefficients = [2.0, 1.0, 1.0, 1.0, 1.0, 0.5];
        // J6 moves further but is cheap; J1 short but expensive; max picks J6.
        assert!((transition_costs(&from, &to, &coefficients) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_from_oa_axes() {
        // Orientation along y, approach along z: identity rotation.
        let rotation = rotation_from_oa(Vector3::y(), Vector3::z());
        assert!(rotation.angle() < 1e-12);

        // Approach along x tips the tool z axis onto world x.
        let rotation = rotation_from_oa(Vector3::y(), Vector3::x());
        let tipped = rotation * Vector3::z();
        assert!((tipped - Vector3::x()).norm() < 1e-12);
    }

    #[test]
    fn test_pose_xyz_rpy() {
        let pose = pose_xyz_rpy(1.0, 2.0, 3.0, 0.0, 0.0, FRAC_PI_2);
        let p = pose.transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y - 3.0).abs() < 1e-12);
        assert!((p.z - 3.0).abs() < 1e-12);
    }
}
