//! Forward kinematics of the Fanuc LR Mate 200iD: the flange pose for a given
//! set of joint angles, the intermediate joint frames, and a staged reach
//! sequence engaging one joint after another.

use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::{as_radians, dump_joints, dump_pose};

fn main() {
    let parameters = Parameters::lr_mate_200id();
    print!("{}", parameters);

    let robot = DHKinematics::new(parameters);

    let joints: Joints = as_radians([30.0, -45.0, 60.0, -30.0, 45.0, 90.0]);
    println!("\nJoint angles:");
    dump_joints(&joints);

    let pose: Pose = robot.forward(&joints); // Pose is alias of nalgebra::Isometry3<f64>
    println!("\nFlange pose:");
    dump_pose(&pose);

    println!("\nIntermediate frames T01 .. T06:");
    let frames = robot.forward_with_joint_poses(&joints);
    for (k, frame) in frames.iter().enumerate() {
        print!("T0{}  ", k + 1);
        dump_pose(frame);
    }

    // Engage one joint after another, then unwind in reverse order. Watching
    // the TCP drift stage by stage is a quick sanity check of a fresh table.
    println!("\nStaged reach sequence:");
    let mut staged: Joints = [0.0; 6];
    let mut stages: Vec<Joints> = vec![staged];
    for k in 0..6 {
        staged[k] = joints[k];
        stages.push(staged);
    }
    for k in (0..6).rev() {
        staged[k] = 0.0;
        stages.push(staged);
    }
    for stage in &stages {
        let translation = robot.forward(stage).translation;
        println!(
            "tcp: {:7.3} {:7.3} {:7.3}",
            translation.x, translation.y, translation.z
        );
    }

    // The stretched-out zero position folds the wrist flat.
    match robot.kinematic_singularity(&[0.0; 6]) {
        Some(singularity) => println!("\nAt zero angles: singular position ({:?})", singularity),
        None => println!("\nAt zero angles: no singularity"),
    }
}
