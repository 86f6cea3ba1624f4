//! Hardcoded Denavit-Hartenberg tables for a few robots

pub mod dh_kinematics {
    use crate::parameters::dh_kinematics::{Link, Parameters};
    use std::f64::consts::PI;

    #[allow(dead_code)]
    impl Parameters {
        /// ABB IRB 120-3/0.6. All dimensions in meters, datasheet joint limits.
        pub fn abb_irb120() -> Self {
            Parameters {
                name: "ABB IRB 120-3/0.6".to_string(),
                links: [
                    Link::revolute(0.290, 0.0, PI / 2.0).with_limits(-2.87979, 2.87979),
                    Link::revolute(0.0, 0.270, 0.0)
                        .with_offset(PI / 2.0)
                        .with_limits(-1.91986, 1.91986),
                    Link::revolute(0.0, 0.070, PI / 2.0).with_limits(-1.91986, 1.22173),
                    Link::revolute(0.302, 0.0, -PI / 2.0).with_limits(-2.79253, 2.79253),
                    Link::revolute(0.0, 0.0, PI / 2.0).with_limits(-2.0944, 2.0944),
                    Link::revolute(0.072, 0.0, 0.0).with_limits(-6.98132, 6.98132),
                ],
            }
        }

        /// Fanuc LR Mate 200iD.
        pub fn lr_mate_200id() -> Self {
            Parameters {
                name: "Fanuc LR Mate 200iD".to_string(),
                links: [
                    Link::revolute(0.330, 0.0, PI / 2.0).with_limits(-2.89, 2.89),
                    Link::revolute(0.0, 0.260, 0.0)
                        .with_offset(PI / 2.0)
                        .with_limits(-1.75, 2.79),
                    Link::revolute(0.0, 0.020, PI / 2.0).with_limits(-2.44, 2.44),
                    Link::revolute(0.290, 0.0, -PI / 2.0).with_limits(-3.14, 3.14),
                    Link::revolute(0.0, 0.0, PI / 2.0).with_limits(-2.09, 2.09),
                    Link::revolute(0.070, 0.0, 0.0).with_limits(-6.28, 6.28),
                ],
            }
        }

        /// Kuka KR5 arc.
        pub fn kuka_kr5() -> Self {
            Parameters {
                name: "Kuka KR5".to_string(),
                links: [
                    Link::revolute(0.400, 0.180, PI / 2.0)
                        .with_limits((-155.0_f64).to_radians(), 155.0_f64.to_radians()),
                    Link::revolute(0.0, 0.600, 0.0)
                        .with_offset(PI / 2.0)
                        .with_limits((-180.0_f64).to_radians(), 65.0_f64.to_radians()),
                    Link::revolute(0.0, 1.200, PI / 2.0)
                        .with_limits((-110.0_f64).to_radians(), 170.0_f64.to_radians()),
                    Link::revolute(0.620, 0.0, -PI / 2.0)
                        .with_limits((-165.0_f64).to_radians(), 165.0_f64.to_radians()),
                    Link::revolute(0.0, 0.0, PI / 2.0)
                        .with_limits((-140.0_f64).to_radians(), 140.0_f64.to_radians()),
                    Link::revolute(0.115, 0.0, 0.0)
                        .with_limits((-360.0_f64).to_radians(), 360.0_f64.to_radians()),
                ],
            }
        }

        /// Dobot CR3 collaborative arm. The elbow (J3) is mechanically limited
        /// to roughly +/- 155 degrees; the remaining joints can do full turns.
        pub fn dobot_cr3() -> Self {
            Parameters {
                name: "Dobot CR3".to_string(),
                links: [
                    Link::revolute(0.1340, 0.0, PI / 2.0).with_limits(-2.0 * PI, 2.0 * PI),
                    Link::revolute(0.1288, 0.274, PI)
                        .with_offset(PI / 2.0)
                        .with_limits(-2.0 * PI, 2.0 * PI),
                    Link::revolute(0.1160, 0.230, -PI).with_limits(-0.8611 * PI, 0.8611 * PI),
                    Link::revolute(0.1160, 0.0, -PI / 2.0)
                        .with_offset(-PI / 2.0)
                        .with_limits(-2.0 * PI, 2.0 * PI),
                    Link::revolute(0.1160, 0.0, PI / 2.0).with_limits(-2.0 * PI, 2.0 * PI),
                    Link::revolute(0.1050, 0.0, 0.0).with_limits(-2.0 * PI, 2.0 * PI),
                ],
            }
        }

        /// Unimation Puma 560, the classic table with the shoulder raised to the
        /// pedestal height.
        pub fn puma560() -> Self {
            Parameters {
                name: "Puma 560".to_string(),
                links: [
                    Link::revolute(0.6718, 0.0, PI / 2.0)
                        .with_limits((-160.0_f64).to_radians(), 160.0_f64.to_radians()),
                    Link::revolute(0.0, 0.4318, 0.0)
                        .with_limits((-45.0_f64).to_radians(), 225.0_f64.to_radians()),
                    Link::revolute(0.15005, 0.0203, -PI / 2.0)
                        .with_limits((-225.0_f64).to_radians(), 45.0_f64.to_radians()),
                    Link::revolute(0.4318, 0.0, PI / 2.0)
                        .with_limits((-110.0_f64).to_radians(), 170.0_f64.to_radians()),
                    Link::revolute(0.0, 0.0, -PI / 2.0)
                        .with_limits((-100.0_f64).to_radians(), 100.0_f64.to_radians()),
                    Link::revolute(0.0, 0.0, 0.0)
                        .with_limits((-266.0_f64).to_radians(), 266.0_f64.to_radians()),
                ],
            }
        }
    }
}
