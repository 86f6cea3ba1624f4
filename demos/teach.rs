//! Interactive teaching window for the ABB IRB 120: joint sliders drive the
//! forward kinematics, the TCP sliders ask the solver for a matching joint
//! position. Run with `--features visualization`.

use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::visualization;

fn main() {
    let robot = DHKinematics::new_within_limits(Parameters::abb_irb120());

    // Start with the upper arm raised, as the robot parks.
    let initial_angles = [0.0, 90.0, 0.0, 0.0, 0.0, 0.0];

    // Boundaries for the XYZ drawbars in the GUI
    let tcp_box = [-0.8..=0.8, -0.8..=0.8, -0.1..=1.0];

    visualization::visualize_robot(robot, initial_angles, tcp_box);
}
