//! Cartesian path with the Dobot CR3: pose-to-pose interpolation along the
//! edges of a cube, solved to joint space with warm-started inverse
//! kinematics. An unreachable waypoint aborts the run with a structured
//! error instead of producing a broken path.

use anyhow::Result;
use rs_dh_kinematics::cartesian::{ctraj_chain, CartesianPath};
use rs_dh_kinematics::ik::SolverConfig;
use rs_dh_kinematics::kinematic_traits::{Kinematics, Pose, JOINTS_AT_ZERO};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::{dump_joints, pose_xyz_rpy};

/// Pivot corner of the cube and its edge length, meters.
const PIVOT: [f64; 3] = [0.2, 0.3, 0.2];
const EDGE: f64 = 0.15;

fn main() -> Result<()> {
    let parameters = Parameters::dobot_cr3();
    print!("{}", parameters);
    let robot = DHKinematics::new(parameters);

    println!("\nPose at all zero angles:");
    let zero_pose = robot.forward(&JOINTS_AT_ZERO).translation;
    println!(
        "tcp: {:7.3} {:7.3} {:7.3}",
        zero_pose.x, zero_pose.y, zero_pose.z
    );

    let (waypoints, labels) = cube_tour();
    println!("\nCube corners:");
    println!("point\tx\ty\tz");
    for (label, pose) in labels.iter().zip(waypoints.iter()) {
        let t = pose.translation.vector;
        println!("{}\t{:.4}\t{:.4}\t{:.4}", label, t.x, t.y, t.z);
    }

    // 10 interpolation steps between each pair of poses.
    let path = ctraj_chain(&waypoints, 10);
    println!("\nGenerated {} poses, solving...", path.len());

    let mut planner = CartesianPath::new(&robot);
    planner.solver = SolverConfig {
        tolerance: 1e-5,
        max_iterations: 500,
        max_seeds: 25,
        ..SolverConfig::default()
    };
    planner.max_transition_cost = 2.0;

    match planner.solve_path(&path, &JOINTS_AT_ZERO) {
        Ok(trace) => {
            println!("Solved all {} poses. Joint positions at every 10th:", trace.len());
            for joints in trace.iter().step_by(10) {
                dump_joints(joints);
            }
        }
        Err(error) => {
            // The original fixture stops the robot rather than skipping points.
            return Err(error.into());
        }
    }
    Ok(())
}

/// The corner tour of the cube: lettered corners, tilted at the lower ones so
/// the tool clears the work surface.
fn cube_tour() -> (Vec<Pose>, Vec<&'static str>) {
    let lower = |x: f64, y: f64, z: f64| {
        pose_xyz_rpy(
            x,
            y,
            z,
            180.0_f64.to_radians(),
            36.0_f64.to_radians(),
            (-81.0_f64).to_radians(),
        )
    };
    let upper = |x: f64, y: f64, z: f64| {
        pose_xyz_rpy(x, y, z, 0.0, 0.0, (-46.0_f64).to_radians())
    };

    let [x, y, z] = PIVOT;
    let poses = vec![
        lower(x, y - EDGE, z - EDGE),        // A
        upper(x, y - EDGE, z),               // B
        upper(x, y, z),                      // C (pivot)
        lower(x, y, z - EDGE),               // D
        lower(x, y - EDGE, z - EDGE),        // A
        lower(x + EDGE, y - EDGE, z - EDGE), // H
        upper(x + EDGE, y - EDGE, z),        // G
        upper(x + EDGE, y, z),               // F
        lower(x + EDGE, y, z - EDGE),        // E
        lower(x + EDGE, y - EDGE, z - EDGE), // H
        upper(x + EDGE, y - EDGE, z),        // G
        upper(x, y - EDGE, z),               // B
        upper(x, y, z),                      // C
        upper(x + EDGE, y, z),               // F
        lower(x + EDGE, y, z - EDGE),        // E
        lower(x, y, z - EDGE),               // D
    ];
    let labels = vec![
        "A", "B", "C", "D", "A", "H", "G", "F", "E", "H", "G", "B", "C", "F", "E", "D",
    ];
    (poses, labels)
}
