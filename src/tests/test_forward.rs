//! Forward kinematics against the textbook matrices and known datasheet poses.

use super::test_utils::{all_robots, assert_translation, reference_pose};
use crate::kinematic_traits::{Joints, Kinematics, JOINTS_AT_ZERO};
use crate::kinematics_impl::DHKinematics;
use crate::parameters::dh_kinematics::{Link, Parameters};
use crate::tool::{Base, Tool};
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use std::sync::Arc;

const TEST_JOINTS: [Joints; 3] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.3, -0.4, 0.5, -0.3, 0.45, 1.0],
    [-1.2, 0.7, -0.6, 1.5, -0.9, 2.1],
];

#[test]
fn test_forward_matches_textbook_matrices() {
    for parameters in all_robots() {
        let robot = DHKinematics::new(parameters.clone());
        for joints in &TEST_JOINTS {
            let expected = reference_pose(&parameters, joints);
            let computed = robot.forward(joints).to_homogeneous();
            for row in 0..4 {
                for column in 0..4 {
                    assert!(
                        (expected[(row, column)] - computed[(row, column)]).abs() < 1e-9,
                        "{}: fk disagrees with the textbook matrix at ({}, {})",
                        parameters.name,
                        row,
                        column
                    );
                }
            }
        }
    }
}

#[test]
fn test_irb120_zero_position() {
    // The stretched-up zero position of the IRB 120 puts the flange at
    // x = d4 + d6, z = d1 + a2 + a3.
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let pose = robot.forward(&JOINTS_AT_ZERO);
    assert_translation(&pose, 0.374, 0.0, 0.630, 1e-9);
}

#[test]
fn test_lr_mate_zero_position() {
    let robot = DHKinematics::new(Parameters::lr_mate_200id());
    let pose = robot.forward(&JOINTS_AT_ZERO);
    assert_translation(&pose, 0.360, 0.0, 0.610, 1e-9);
}

#[test]
fn test_planar_two_link_arm() {
    // A planar 2R arm padded with four immobile links: the classic
    // x = a1 cos q1 + a2 cos(q1 + q2) check.
    let (a1, a2) = (0.5, 0.3);
    let parameters = Parameters {
        name: "planar 2R".to_string(),
        links: [
            Link::revolute(0.0, a1, 0.0),
            Link::revolute(0.0, a2, 0.0),
            Link::revolute(0.0, 0.0, 0.0),
            Link::revolute(0.0, 0.0, 0.0),
            Link::revolute(0.0, 0.0, 0.0),
            Link::revolute(0.0, 0.0, 0.0),
        ],
    };
    let robot = DHKinematics::new(parameters);
    for (q1, q2) in [(0.0, 0.0), (0.4, 0.6), (-1.1, 0.8), (2.0, -0.5)] {
        let pose = robot.forward(&[q1, q2, 0.0, 0.0, 0.0, 0.0]);
        assert_translation(
            &pose,
            a1 * q1.cos() + a2 * (q1 + q2).cos(),
            a1 * q1.sin() + a2 * (q1 + q2).sin(),
            0.0,
            1e-12,
        );
    }
}

#[test]
fn test_joint_poses_end_with_flange() {
    let robot = DHKinematics::new(Parameters::dobot_cr3());
    let joints = TEST_JOINTS[1];
    let frames = robot.forward_with_joint_poses(&joints);
    let flange = robot.forward(&joints);
    assert!((frames[5].translation.vector - flange.translation.vector).norm() < 1e-12);
    // The first frame sits on top of the base column.
    assert!((frames[0].translation.vector.z - 0.134).abs() < 1e-12);
}

#[test]
fn test_base_raises_robot() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let plain = robot.forward(&JOINTS_AT_ZERO);
    let on_pedestal = Base {
        robot: Arc::new(DHKinematics::new(Parameters::abb_irb120())),
        base: Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 0.5),
            UnitQuaternion::identity(),
        ),
    };
    let raised = on_pedestal.forward(&JOINTS_AT_ZERO);
    assert!((raised.translation.z - plain.translation.z - 0.5).abs() < 1e-12);
    assert!((raised.translation.x - plain.translation.x).abs() < 1e-12);
}

#[test]
fn test_tool_extends_along_approach() {
    // At the zero position of the IRB 120 the flange approach axis points
    // along world x, so a 0.1 m pen extends x by 0.1.
    let with_pen = Tool {
        robot: Arc::new(DHKinematics::new(Parameters::abb_irb120())),
        tool: Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 0.1),
            UnitQuaternion::identity(),
        ),
    };
    let pose = with_pen.forward(&JOINTS_AT_ZERO);
    assert_translation(&pose, 0.474, 0.0, 0.630, 1e-9);
}

#[test]
fn test_display_and_yaml_render() {
    let parameters = Parameters::puma560();
    let table = format!("{}", parameters);
    assert!(table.contains("Puma 560"));
    assert!(table.contains("6 axes"));
    assert_eq!(table.lines().count(), 8);

    let yaml = parameters.to_yaml();
    assert!(yaml.contains("name: Puma 560"));
    assert!(yaml.contains("links:"));
}
