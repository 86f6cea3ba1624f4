//! Inverse kinematics round trips, position-only solving, failure reporting
//! and solution ordering.

use super::test_utils::all_robots;
use crate::ik::{IkTarget, SolverConfig};
use crate::kinematic_traits::{Joints, Kinematics, Singularity, JOINTS_AT_ZERO};
use crate::kinematics_impl::DHKinematics;
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::transition_costs;
use nalgebra::Vector3;

/// A moderate configuration inside the limits of all five models.
const GOAL: Joints = [0.3, -0.35, 0.4, -0.25, 0.5, 0.6];

#[test]
fn test_round_trip_all_robots() {
    for parameters in all_robots() {
        let name = parameters.name.clone();
        let robot = DHKinematics::new(parameters);
        let pose = robot.forward(&GOAL);

        let result = robot.solve(
            &IkTarget::Pose(pose),
            &JOINTS_AT_ZERO,
            &SolverConfig::default(),
        );
        assert!(
            result.converged,
            "{}: no solution, residual {} m",
            name, result.position_error
        );
        let reached = robot.forward(&result.joints);
        assert!(
            (reached.translation.vector - pose.translation.vector).norm() < 1e-4,
            "{}: solution misses the target",
            name
        );
        assert!(reached.rotation.angle_to(&pose.rotation) < 1e-3, "{}", name);
    }
}

#[test]
fn test_position_only_leaves_orientation_free() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let target = Vector3::new(0.3, 0.1, 0.4);
    let result = robot.solve(
        &IkTarget::Position(target),
        &JOINTS_AT_ZERO,
        &SolverConfig::default(),
    );
    assert!(result.converged, "residual {} m", result.position_error);
    assert_eq!(result.angular_error, 0.0);
    let reached = robot.forward(&result.joints);
    assert!((reached.translation.vector - target).norm() < 1e-4);
}

#[test]
fn test_unreachable_target_reports_failure() {
    let robot = DHKinematics::new(Parameters::lr_mate_200id());
    // Far outside the roughly one meter reach.
    let result = robot.solve(
        &IkTarget::Position(Vector3::new(2.0, 2.0, 2.0)),
        &JOINTS_AT_ZERO,
        &SolverConfig {
            max_iterations: 50,
            max_seeds: 5,
            ..SolverConfig::default()
        },
    );
    assert!(!result.converged);
    assert!(result.position_error > 1.0);
    assert_eq!(result.seeds_tried, 5);
}

#[test]
fn test_warm_start_is_not_slower() {
    let robot = DHKinematics::new(Parameters::kuka_kr5());
    let pose = robot.forward(&GOAL);
    let config = SolverConfig::default();

    let cold = robot.solve(&IkTarget::Pose(pose), &JOINTS_AT_ZERO, &config);
    assert!(cold.converged);

    let warm = robot.solve(&IkTarget::Pose(pose), &cold.joints, &config);
    assert!(warm.converged);
    assert!(warm.iterations <= cold.iterations);
}

#[test]
fn test_solutions_respect_joint_limits() {
    let robot = DHKinematics::new_within_limits(Parameters::abb_irb120());
    let pose = robot.forward(&GOAL);
    let solutions = robot.inverse(&pose);
    assert!(!solutions.is_empty());
    for solution in &solutions {
        for (k, link) in robot.parameters().links.iter().enumerate() {
            assert!(
                link.within_limits(solution[k]),
                "joint {} at {} leaves [{}, {}]",
                k + 1,
                solution[k],
                link.qlim[0],
                link.qlim[1]
            );
        }
        // Every returned solution must reproduce the requested pose.
        let reached = robot.forward(solution);
        assert!((reached.translation.vector - pose.translation.vector).norm() < 1e-4);
    }
}

#[test]
fn test_continuing_solutions_sorted_by_proximity() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let pose = robot.forward(&GOAL);
    let solutions = robot.inverse_continuing(&pose, &GOAL);
    assert!(!solutions.is_empty());
    // The known configuration itself must lead the list.
    assert!(transition_costs(&solutions[0], &GOAL, &[1.0; 6]) < 1e-4);
    let costs: Vec<f64> = solutions
        .iter()
        .map(|s| transition_costs(s, &GOAL, &[1.0; 6]))
        .collect();
    for pair in costs.windows(2) {
        assert!(pair[0] <= pair[1] + 1e-12, "solutions out of order: {:?}", costs);
    }
}

#[test]
fn test_wrist_singularity_detected() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    // J5 at zero folds J4 and J6 onto one axis.
    assert_eq!(
        robot.kinematic_singularity(&JOINTS_AT_ZERO),
        Some(Singularity::Aligned)
    );
    assert_eq!(
        robot.kinematic_singularity(&[0.0, 0.2, 0.3, 0.1, 0.5, 0.0]),
        None
    );
}
