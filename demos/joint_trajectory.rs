//! Joint-space trajectory of the ABB IRB 120: a quintic sweep through a list
//! of configurations, with the resulting TCP path and joint extremes printed
//! to the console.

use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::trajectory::jtraj_chain;
use rs_dh_kinematics::utils::as_radians;

fn main() {
    let parameters = Parameters::abb_irb120();
    print!("{}", parameters);
    let robot = DHKinematics::new(parameters);

    // Alternating full-arm swings.
    let configurations: Vec<Joints> = vec![
        as_radians([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        as_radians([45.0, -45.0, 45.0, -45.0, 45.0, -45.0]),
        as_radians([-45.0, 45.0, -45.0, 45.0, -45.0, 45.0]),
        as_radians([90.0, -90.0, 90.0, -90.0, 90.0, -90.0]),
        as_radians([-90.0, 90.0, -90.0, 90.0, -90.0, 90.0]),
    ];

    // 30 samples per segment, 3 seconds per segment.
    let trajectory = jtraj_chain(&configurations, 30, 3.0);
    println!(
        "\n{} samples over {:.1} seconds",
        trajectory.len(),
        trajectory.t[trajectory.len() - 1]
    );

    println!("\nTCP path (every 10th sample):");
    for k in (0..trajectory.len()).step_by(10) {
        let translation = robot.forward(&trajectory.q[k]).translation;
        println!(
            "t = {:5.2} s   tcp: {:7.3} {:7.3} {:7.3}",
            trajectory.t[k], translation.x, translation.y, translation.z
        );
    }

    // Per-joint travel summary over the whole sweep.
    println!("\nJoint positions along the trajectory (degrees):");
    for joint in 0..6 {
        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;
        let mut fastest: f64 = 0.0;
        for k in 0..trajectory.len() {
            lowest = lowest.min(trajectory.q[k][joint]);
            highest = highest.max(trajectory.q[k][joint]);
            fastest = fastest.max(trajectory.qd[k][joint].abs());
        }
        println!(
            "Joint {}: {:7.1} .. {:7.1}, peak velocity {:6.1} deg/s",
            joint + 1,
            lowest.to_degrees(),
            highest.to_degrees(),
            fastest.to_degrees()
        );
    }

    // The quintic profile rests at every listed configuration.
    let boundary = trajectory.len() - 1;
    for joint in 0..6 {
        assert!(trajectory.qd[0][joint].abs() < 1e-9);
        assert!(trajectory.qd[boundary][joint].abs() < 1e-9);
    }
    println!("\nBoundary velocities are zero, the sweep rests at both ends.");
}
