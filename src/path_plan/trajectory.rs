//! Joint-space trajectory generation.
//!
//! A quintic (fifth order) polynomial connects two configurations with zero
//! boundary acceleration and selectable boundary velocity, the classic
//! rest-to-rest profile of industrial arm moves.

use crate::kinematic_traits::Joints;

/// Quintic polynomial for one axis: position `q0` to `q1` over `0..tf`, with
/// boundary velocities `v0`/`v1` and zero boundary acceleration.
#[derive(Debug, Clone, Copy)]
pub struct Quintic {
    coefficients: [f64; 6],
}

impl Quintic {
    pub fn new(q0: f64, q1: f64, v0: f64, v1: f64, tf: f64) -> Self {
        let h = q1 - q0;
        let t2 = tf * tf;
        let t3 = t2 * tf;
        let t4 = t3 * tf;
        let t5 = t4 * tf;
        Quintic {
            coefficients: [
                q0,
                v0,
                0.0,
                (20.0 * h - (8.0 * v1 + 12.0 * v0) * tf) / (2.0 * t3),
                (-30.0 * h + (14.0 * v1 + 16.0 * v0) * tf) / (2.0 * t4),
                (12.0 * h - 6.0 * (v1 + v0) * tf) / (2.0 * t5),
            ],
        }
    }

    /// Position at time t.
    pub fn position(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        ((((c[5] * t + c[4]) * t + c[3]) * t + c[2]) * t + c[1]) * t + c[0]
    }

    /// Velocity at time t.
    pub fn velocity(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        (((5.0 * c[5] * t + 4.0 * c[4]) * t + 3.0 * c[3]) * t + 2.0 * c[2]) * t + c[1]
    }

    /// Acceleration at time t.
    pub fn acceleration(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        ((20.0 * c[5] * t + 12.0 * c[4]) * t + 6.0 * c[3]) * t + 2.0 * c[2]
    }
}

/// A sampled joint-space trajectory: time stamps with positions, velocities
/// and accelerations for each sample.
#[derive(Debug, Clone, Default)]
pub struct JointTrajectory {
    pub t: Vec<f64>,
    pub q: Vec<Joints>,
    pub qd: Vec<Joints>,
    pub qdd: Vec<Joints>,
}

impl JointTrajectory {
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

/// Quintic rest-to-rest trajectory from `q0` to `q1`: `steps` samples over
/// `tf` seconds. Starts and ends exactly at the given configurations with zero
/// velocity and acceleration.
pub fn jtraj(q0: &Joints, q1: &Joints, steps: usize, tf: f64) -> JointTrajectory {
    jtraj_with_velocity(q0, q1, &[0.0; 6], &[0.0; 6], steps, tf)
}

/// Quintic trajectory with explicit boundary velocities.
pub fn jtraj_with_velocity(
    q0: &Joints,
    q1: &Joints,
    v0: &Joints,
    v1: &Joints,
    steps: usize,
    tf: f64,
) -> JointTrajectory {
    let steps = steps.max(2);
    let polynomials: [Quintic; 6] =
        std::array::from_fn(|i| Quintic::new(q0[i], q1[i], v0[i], v1[i], tf));

    let mut trajectory = JointTrajectory::default();
    for k in 0..steps {
        let t = tf * k as f64 / (steps - 1) as f64;
        trajectory.t.push(t);
        trajectory
            .q
            .push(std::array::from_fn(|i| polynomials[i].position(t)));
        trajectory
            .qd
            .push(std::array::from_fn(|i| polynomials[i].velocity(t)));
        trajectory
            .qdd
            .push(std::array::from_fn(|i| polynomials[i].acceleration(t)));
    }
    trajectory
}

/// Chains quintic segments through a list of configurations, resting at each
/// of them. Junction samples are not duplicated; time stamps accumulate over
/// the segments.
pub fn jtraj_chain(configurations: &[Joints], steps: usize, tf: f64) -> JointTrajectory {
    let mut chained = JointTrajectory::default();
    for (index, window) in configurations.windows(2).enumerate() {
        let segment = jtraj(&window[0], &window[1], steps, tf);
        let offset = tf * index as f64;
        let skip = if index == 0 { 0 } else { 1 };
        for k in skip..segment.len() {
            chained.t.push(segment.t[k] + offset);
            chained.q.push(segment.q[k]);
            chained.qd.push(segment.qd[k]);
            chained.qdd.push(segment.qdd[k]);
        }
    }
    chained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quintic_rest_to_rest() {
        let quintic = Quintic::new(1.0, 3.0, 0.0, 0.0, 2.0);
        assert!((quintic.position(0.0) - 1.0).abs() < 1e-12);
        assert!((quintic.position(2.0) - 3.0).abs() < 1e-12);
        assert!((quintic.position(1.0) - 2.0).abs() < 1e-12); // midpoint is the mean
        assert!(quintic.velocity(0.0).abs() < 1e-12);
        assert!(quintic.velocity(2.0).abs() < 1e-12);
        assert!(quintic.acceleration(0.0).abs() < 1e-12);
        assert!(quintic.acceleration(2.0).abs() < 1e-9);
    }

    #[test]
    fn test_quintic_boundary_velocities() {
        let quintic = Quintic::new(0.0, 1.0, 0.5, -0.25, 2.0);
        assert!((quintic.velocity(0.0) - 0.5).abs() < 1e-12);
        assert!((quintic.velocity(2.0) + 0.25).abs() < 1e-9);
        assert!(quintic.acceleration(0.0).abs() < 1e-12);
    }

    #[test]
    fn test_jtraj_endpoints_and_length() {
        let q0 = [0.0, 0.1, -0.2, 0.3, -0.4, 0.5];
        let q1 = [0.6, -0.5, 0.4, -0.3, 0.2, -0.1];
        let trajectory = jtraj(&q0, &q1, 50, 3.0);
        assert_eq!(trajectory.len(), 50);
        assert_eq!(trajectory.q[0], q0);
        for i in 0..6 {
            assert!((trajectory.q[49][i] - q1[i]).abs() < 1e-9);
            assert!(trajectory.qd[0][i].abs() < 1e-12);
            assert!(trajectory.qd[49][i].abs() < 1e-9);
        }
        assert!((trajectory.t[49] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_jtraj_chain_continuous() {
        let a = [0.0; 6];
        let b = [0.5; 6];
        let c = [-0.5; 6];
        let chained = jtraj_chain(&[a, b, c], 30, 3.0);
        // Two segments of 30 samples, junction sample deduplicated.
        assert_eq!(chained.len(), 59);
        assert_eq!(chained.q[0], a);
        for i in 0..6 {
            assert!((chained.q[58][i] - c[i]).abs() < 1e-9);
        }
        // Time grows monotonically across the junction.
        for w in chained.t.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert!((chained.t[58] - 6.0).abs() < 1e-9);
    }
}
