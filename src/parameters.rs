//! Defines the Denavit-Hartenberg parameter data structures

pub mod dh_kinematics {
    use crate::kinematic_traits::{Joints, Pose};
    use crate::utils::deg;
    use nalgebra::{Isometry3, Vector3};
    use std::f64::consts::PI;
    use std::fmt;

    /// Kind of the joint actuating a link.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum JointKind {
        /// The joint variable is the rotation angle theta (radians).
        Revolute,
        /// The joint variable is the displacement d along z (meters).
        Prismatic,
    }

    /// One row of the Denavit-Hartenberg table: the transform from the previous
    /// joint frame to this one.
    ///
    /// The full transform is RotZ(theta) * TransZ(d) * TransX(a) * RotX(alpha),
    /// where theta = q + offset for revolute joints and d = d + q for prismatic
    /// ones.
    #[derive(Debug, Clone, Copy)]
    pub struct Link {
        pub kind: JointKind,

        /// Link offset, the displacement along the previous z axis.
        pub d: f64,

        /// Link length, the displacement along the rotated x axis.
        pub a: f64,

        /// Link twist, the fixed rotation about the rotated x axis.
        pub alpha: f64,

        /// Offset added to the joint variable to shift the reference zero
        /// position.
        pub offset: f64,

        /// Lower and upper joint limits. The solver clamps to this range and
        /// samples restart seeds from it.
        pub qlim: [f64; 2],
    }

    impl Link {
        /// A revolute link with zero offset and a generous default joint range.
        pub fn revolute(d: f64, a: f64, alpha: f64) -> Self {
            Link {
                kind: JointKind::Revolute,
                d,
                a,
                alpha,
                offset: 0.0,
                qlim: [-2.0 * PI, 2.0 * PI],
            }
        }

        /// A prismatic link. The joint variable extends `d`, the angle about z
        /// stays at `offset`.
        pub fn prismatic(a: f64, alpha: f64) -> Self {
            Link {
                kind: JointKind::Prismatic,
                d: 0.0,
                a,
                alpha,
                offset: 0.0,
                qlim: [0.0, 1.0],
            }
        }

        pub fn with_offset(mut self, offset: f64) -> Self {
            self.offset = offset;
            self
        }

        pub fn with_limits(mut self, from: f64, to: f64) -> Self {
            self.qlim = [from, to];
            self
        }

        /// The joint-to-joint transform for the given joint variable.
        pub fn transform(&self, q: f64) -> Pose {
            let (theta, d) = match self.kind {
                JointKind::Revolute => (q + self.offset, self.d),
                JointKind::Prismatic => (self.offset, self.d + q),
            };
            // TransZ(d) * TransX(a) collapse into a single translation.
            Isometry3::rotation(Vector3::z() * theta)
                * Isometry3::translation(self.a, 0.0, d)
                * Isometry3::rotation(Vector3::x() * self.alpha)
        }

        /// True if the joint variable stays within the declared limits.
        pub fn within_limits(&self, q: f64) -> bool {
            q >= self.qlim[0] && q <= self.qlim[1]
        }
    }

    /// Parameters of a serial arm: a name and six Denavit-Hartenberg rows.
    /// See [crate::parameters_robots] for concrete robot models.
    #[derive(Debug, Clone)]
    pub struct Parameters {
        pub name: String,
        pub links: [Link; 6],
    }

    impl Parameters {
        /// Pose of every joint frame for the given joint positions, base to
        /// flange (cumulative product of the link transforms).
        pub fn joint_frames(&self, joints: &Joints) -> [Pose; 6] {
            let mut frames = [Pose::identity(); 6];
            let mut current = Pose::identity();
            for (k, link) in self.links.iter().enumerate() {
                current *= link.transform(joints[k]);
                frames[k] = current;
            }
            frames
        }

        /// Rough upper bound of the arm's reach, the sum of all link dimensions.
        /// Useful for sizing workspaces and plots, not a workspace guarantee.
        pub fn reach(&self) -> f64 {
            self.links.iter().map(|l| l.a.abs() + l.d.abs()).sum()
        }

        /// Convert to string yaml representation (quick viewing, etc).
        /// The file loader reads this format back.
        pub fn to_yaml(&self) -> String {
            let mut out = format!("name: {}\nlinks:\n", self.name);
            for link in &self.links {
                let kind = match link.kind {
                    JointKind::Revolute => "revolute",
                    JointKind::Prismatic => "prismatic",
                };
                out.push_str(&format!(
                    "  - {{ kind: {}, d: {}, a: {}, alpha: {}, offset: {}, qlim: [{}, {}] }}\n",
                    kind,
                    link.d,
                    link.a,
                    deg(&link.alpha),
                    deg(&link.offset),
                    deg(&link.qlim[0]),
                    deg(&link.qlim[1]),
                ));
            }
            out
        }
    }

    impl fmt::Display for Parameters {
        /// Renders the Denavit-Hartenberg table in the way the robot is usually
        /// checked against a datasheet.
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            writeln!(f, "{}, 6 axes", self.name)?;
            writeln!(
                f,
                "{:>3} {:>5} {:>10} {:>10} {:>10} {:>10} {:>22}",
                "j", "kind", "d", "a", "alpha", "offset", "qlim"
            )?;
            for (k, link) in self.links.iter().enumerate() {
                let kind = match link.kind {
                    JointKind::Revolute => "R",
                    JointKind::Prismatic => "P",
                };
                writeln!(
                    f,
                    "{:>3} {:>5} {:>10.4} {:>10.4} {:>10.4} {:>10.4}   [{:>8.4}, {:>8.4}]",
                    k + 1,
                    kind,
                    link.d,
                    link.a,
                    link.alpha,
                    link.offset,
                    link.qlim[0],
                    link.qlim[1],
                )?;
            }
            Ok(())
        }
    }
}
