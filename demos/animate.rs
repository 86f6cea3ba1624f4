//! Trajectory playback for the Fanuc LR Mate 200iD: a quintic sweep through a
//! list of configurations, replayed in a loop with the TCP trace drawn in the
//! window. Run with `--features visualization`.

use rs_dh_kinematics::kinematic_traits::Joints;
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::trajectory::jtraj_chain;
use rs_dh_kinematics::utils::as_radians;
use rs_dh_kinematics::visualization;

fn main() {
    let robot = DHKinematics::new(Parameters::lr_mate_200id());

    let configurations: Vec<Joints> = vec![
        as_radians([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        as_radians([30.0, -30.0, 30.0, -30.0, 30.0, -30.0]),
        as_radians([-30.0, 30.0, -30.0, 30.0, -30.0, 30.0]),
        as_radians([60.0, -60.0, 60.0, -60.0, 60.0, -60.0]),
        as_radians([-60.0, 60.0, -60.0, 60.0, -60.0, 60.0]),
    ];
    let trajectory = jtraj_chain(&configurations, 30, 3.0);

    visualization::visualize_trajectory(robot, trajectory.q, 0.05);
}
