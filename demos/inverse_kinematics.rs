//! Inverse kinematics of the Kuka KR5: solve a target pose with explicit
//! tolerances and budgets, verify the solution against forward kinematics,
//! then repeat the exercise with a tool mounted on the flange.

use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use rs_dh_kinematics::ik::{IkTarget, SolverConfig};
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::tool::Tool;
use rs_dh_kinematics::utils::{
    as_radians, assert_pose_eq, dump_joints, dump_pose, dump_solutions, pose_xyz_rpy,
};
use std::sync::Arc;

fn main() {
    let parameters = Parameters::kuka_kr5();
    print!("{}", parameters);
    let robot = DHKinematics::new_within_limits(parameters);

    println!("\nPose at all zero angles:");
    dump_pose(&robot.forward(&JOINTS_AT_ZERO));

    // Upright target above the base, no tool rotation.
    let target: Pose = pose_xyz_rpy(0.915, 0.0, 2.2, 0.0, 0.0, 0.0);
    println!("\nTarget:");
    dump_pose(&target);

    let seed: Joints = as_radians([0.0, 45.0, 90.0, 0.0, 0.0, 0.0]);
    let config = SolverConfig {
        tolerance: 1e-6,
        max_iterations: 100,
        max_seeds: 100,
        ..SolverConfig::default()
    };
    let solution = robot.solve(&IkTarget::Pose(target), &seed, &config);
    println!("\nSuccess: {}", solution.converged);
    if solution.converged {
        println!(
            "Solved in {} iterations over {} seeds:",
            solution.iterations, solution.seeds_tried
        );
        dump_joints(&solution.joints);
        println!("Pose after solving:");
        let reached = robot.forward(&solution.joints);
        dump_pose(&reached);
        assert_pose_eq(&reached, &target, 1e-4, 1e-4);
    } else {
        println!(
            "No solution found, best residual {:.4} m",
            solution.position_error
        );
    }

    // The trait surface returns every distinct solution, closest to the seed
    // first.
    println!("\nAll solutions, sorted by proximity to the seed:");
    let solutions = robot.inverse_continuing(&target, &seed);
    dump_solutions(&solutions);

    // Same exercise with a 0.15 m pen on the flange: the pose now refers to
    // the pen tip, not to the flange.
    let with_pen = Tool {
        robot: Arc::new(DHKinematics::new_within_limits(Parameters::kuka_kr5())),
        tool: Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 0.15),
            UnitQuaternion::identity(),
        ),
    };
    println!("\nWith the pen, same target for the pen tip:");
    let solutions = with_pen.inverse_continuing(&target, &seed);
    dump_solutions(&solutions);
    if let Some(best) = solutions.first() {
        println!("Pen tip arrives at:");
        dump_pose(&with_pen.forward(best));
    }
}
