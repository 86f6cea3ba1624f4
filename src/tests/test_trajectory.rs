//! Trajectory generation end to end: joint sweeps stay on the quintic
//! profile, Cartesian paths solve to joint space, failures are structured.

use crate::cartesian::{ctraj_chain, CartesianPath, PathError, PoseFlags};
use crate::ik::SolverConfig;
use crate::kinematic_traits::{Joints, Kinematics, JOINTS_AT_ZERO};
use crate::kinematics_impl::DHKinematics;
use crate::multi_segment::mstraj;
use crate::parameters::dh_kinematics::Parameters;
use crate::trajectory::jtraj;
use nalgebra::{Isometry3, Translation3, UnitQuaternion};

#[test]
fn test_jtraj_follows_tcp_smoothly() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let from: Joints = JOINTS_AT_ZERO;
    let to: Joints = [0.5, -0.4, 0.3, 0.2, 0.6, -0.5];
    let trajectory = jtraj(&from, &to, 60, 3.0);

    // The TCP moves in small steps; a jump would mean a discontinuity.
    let mut previous = robot.forward(&trajectory.q[0]).translation.vector;
    for q in trajectory.q.iter().skip(1) {
        let current = robot.forward(q).translation.vector;
        assert!((current - previous).norm() < 0.05);
        previous = current;
    }
}

#[test]
fn test_cartesian_path_solves_to_joint_space() {
    let robot = DHKinematics::new(Parameters::abb_irb120());

    // Waypoints derived from forward kinematics are guaranteed reachable.
    let stops: [Joints; 3] = [
        [0.2, -0.3, 0.4, 0.1, 0.5, -0.2],
        [0.3, -0.25, 0.35, 0.15, 0.55, -0.1],
        [0.4, -0.2, 0.3, 0.2, 0.6, 0.0],
    ];
    let waypoints: Vec<_> = stops.iter().map(|q| robot.forward(q)).collect();
    let path = ctraj_chain(&waypoints, 5);
    assert_eq!(path.len(), 9);

    let planner = CartesianPath::new(&robot);
    let trace = planner
        .solve_path(&path, &stops[0])
        .expect("the path must solve");
    assert_eq!(trace.len(), path.len());

    // Every solved position reproduces its pose.
    for (joints, annotated) in trace.iter().zip(path.iter()) {
        let reached = robot.forward(joints);
        assert!(
            (reached.translation.vector - annotated.pose.translation.vector).norm() < 1e-4
        );
    }
}

#[test]
fn test_cartesian_path_skips_interpolated_when_asked() {
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let stops: [Joints; 2] = [
        [0.2, -0.3, 0.4, 0.1, 0.5, -0.2],
        [0.3, -0.25, 0.35, 0.15, 0.55, -0.1],
    ];
    let waypoints: Vec<_> = stops.iter().map(|q| robot.forward(q)).collect();
    let path = ctraj_chain(&waypoints, 6);

    let mut planner = CartesianPath::new(&robot);
    planner.include_interpolated = false;
    let trace = planner.solve_path(&path, &stops[0]).expect("must solve");
    let waypoint_count = path
        .iter()
        .filter(|p| p.flags.contains(PoseFlags::WAYPOINT))
        .count();
    assert_eq!(trace.len(), waypoint_count);
}

#[test]
fn test_cartesian_path_structured_errors() {
    let robot = DHKinematics::new(Parameters::lr_mate_200id());
    let planner = CartesianPath::new(&robot);

    assert!(matches!(
        planner.solve_path(&[], &JOINTS_AT_ZERO),
        Err(PathError::EmptyPath)
    ));

    // A pose far outside the workspace fails at its own step index.
    let out_of_reach = Isometry3::from_parts(
        Translation3::new(5.0, 5.0, 5.0),
        UnitQuaternion::identity(),
    );
    let reachable = robot.forward(&[0.2, -0.3, 0.4, 0.1, 0.5, -0.2]);
    let path = ctraj_chain(&[reachable, out_of_reach], 2);
    let mut quick = CartesianPath::new(&robot);
    quick.solver = SolverConfig {
        max_iterations: 100,
        max_seeds: 5,
        ..SolverConfig::default()
    };
    match quick.solve_path(&path, &JOINTS_AT_ZERO) {
        Err(PathError::Unreachable { step, pose }) => {
            assert_eq!(step, 1);
            assert!((pose.translation.vector.x - 5.0).abs() < 1e-9);
        }
        other => panic!("expected an unreachable step, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_mstraj_feeds_position_solver() {
    // The cube demo pipeline in miniature: via points to samples to joints.
    let robot = DHKinematics::new(Parameters::abb_irb120());
    let via = [[0.30, -0.05, 0.40], [0.30, 0.05, 0.40], [0.30, 0.05, 0.50]];
    let trajectory = mstraj(&via, [0.25; 3], 0.05, 0.1).expect("valid input");

    let mut previous = JOINTS_AT_ZERO;
    for point in &trajectory.q {
        let result = robot.solve(
            &crate::ik::IkTarget::Position(nalgebra::Vector3::new(
                point[0], point[1], point[2],
            )),
            &previous,
            &SolverConfig::default(),
        );
        assert!(result.converged, "residual {} m", result.position_error);
        previous = result.joints;
    }
}
