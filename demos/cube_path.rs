//! Cube drawing with the Fanuc LR Mate 200iD: a via-point trajectory along
//! the edges of a cube, traced with position-only inverse kinematics so the
//! wrist is free to orient itself.

use anyhow::{bail, Result};
use nalgebra::Vector3;
use rs_dh_kinematics::ik::{IkTarget, SolverConfig};
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, JOINTS_AT_ZERO};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::multi_segment::mstraj;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::dump_joints;

/// Corners of the cube tour, meters. The tour walks the bottom square first
/// and then covers the remaining edges.
const CUBE_TOUR: [[f64; 3]; 16] = [
    [-0.10, -0.20, 0.00],
    [-0.10, -0.20, 0.30],
    [-0.10, 0.10, 0.30],
    [-0.10, 0.10, 0.00],
    [-0.10, -0.20, 0.00],
    [0.20, -0.20, 0.00],
    [0.20, -0.20, 0.30],
    [0.20, 0.10, 0.30],
    [0.20, 0.10, 0.00],
    [0.20, -0.20, 0.00],
    [0.20, -0.20, 0.30],
    [-0.10, -0.20, 0.30],
    [-0.10, 0.10, 0.30],
    [0.20, 0.10, 0.30],
    [0.20, 0.10, 0.00],
    [-0.10, 0.10, 0.00],
];

/// The targets sit in front of the robot; this shift moves the cube into the
/// comfortable part of the workspace, as the original drawing fixture did.
const FIXTURE_SHIFT: [f64; 3] = [-0.15, 0.0, 0.35];

fn main() -> Result<()> {
    let parameters = Parameters::lr_mate_200id();
    print!("{}", parameters);
    let robot = DHKinematics::new(parameters);

    // Cartesian via-point trajectory: 0.5 m/s per axis, 20 ms samples,
    // 0.2 s blends at the corners.
    let trajectory = mstraj(&CUBE_TOUR, [0.5; 3], 0.02, 0.2)?;
    println!(
        "\n{} Cartesian samples over {:.1} seconds",
        trajectory.len(),
        trajectory.t[trajectory.len() - 1]
    );

    let config = SolverConfig {
        tolerance: 1e-5,
        max_iterations: 100,
        max_seeds: 25,
        ..SolverConfig::default()
    };

    let mut joint_path: Vec<Joints> = Vec::with_capacity(trajectory.len());
    let mut previous = JOINTS_AT_ZERO;
    for (step, point) in trajectory.q.iter().enumerate() {
        let target = Vector3::new(
            point[0] + FIXTURE_SHIFT[0],
            point[1] + FIXTURE_SHIFT[1],
            point[2] + FIXTURE_SHIFT[2],
        );
        let solution = robot.solve(&IkTarget::Position(target), &previous, &config);
        if !solution.converged {
            bail!(
                "point {} at [{:.3}, {:.3}, {:.3}] is out of reach (residual {:.4} m)",
                step,
                target.x,
                target.y,
                target.z,
                solution.position_error
            );
        }
        previous = solution.joints;
        joint_path.push(solution.joints);
    }

    println!("Success: all {} points solved", joint_path.len());
    println!("\nJoint positions at the cube corners:");
    let samples_per_corner = joint_path.len() / CUBE_TOUR.len();
    for corner in 0..CUBE_TOUR.len() {
        dump_joints(&joint_path[corner * samples_per_corner]);
    }

    // The wrist was left free; confirm the pen still landed on the line.
    let checkpoint = joint_path.len() / 2;
    let reached = robot.forward(&joint_path[checkpoint]).translation;
    println!(
        "\nMid-path checkpoint: tcp {:7.3} {:7.3} {:7.3}",
        reached.x, reached.y, reached.z
    );
    Ok(())
}
