//! Numerical inverse kinematics.
//!
//! Iteratively solves for the joint positions that place the end effector at a
//! target, using the geometric Jacobian and a damped least squares
//! (Levenberg-Marquardt) update. A position-only target leaves the orientation
//! free, which is how the hand-guided drawing demos operate.

use crate::kinematic_traits::{Joints, Pose};
use crate::parameters::dh_kinematics::{JointKind, Parameters};
use nalgebra::{DMatrix, DVector, UnitQuaternion, Vector3};
use rand::Rng;
use tracing::debug;

/// What the solver should reach.
#[derive(Debug, Clone)]
pub enum IkTarget {
    /// Target position only (3 constrained degrees of freedom).
    Position(Vector3<f64>),
    /// Target full pose: position and orientation.
    Pose(Pose),
}

impl IkTarget {
    fn rows(&self) -> usize {
        match self {
            IkTarget::Position(_) => 3,
            IkTarget::Pose(_) => 6,
        }
    }
}

/// Configuration of the iterative solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Position tolerance in meters.
    pub tolerance: f64,
    /// Orientation tolerance in radians (full-pose targets only).
    pub angular_tolerance: f64,
    /// Iteration budget per seed.
    pub max_iterations: usize,
    /// Seed budget: the caller's seed plus random restarts within the joint
    /// limits.
    pub max_seeds: usize,
    /// Damping factor lambda. Higher values are more robust near singularities
    /// but converge slower.
    pub damping: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-6,
            angular_tolerance: 1e-5,
            max_iterations: 100,
            max_seeds: 30,
            damping: 0.01,
        }
    }
}

/// Outcome of a solve. When `converged` is false, `joints` holds the best
/// attempt; callers decide whether a large residual is still usable.
#[derive(Debug, Clone)]
pub struct IkResult {
    pub joints: Joints,
    pub converged: bool,
    /// Iterations spent on the seed that produced `joints`.
    pub iterations: usize,
    /// How many seeds were tried in total.
    pub seeds_tried: usize,
    /// Final position error in meters.
    pub position_error: f64,
    /// Final orientation error in radians. Zero for position-only targets.
    pub angular_error: f64,
}

/// Solve starting from the given seed, falling back to random restarts within
/// the joint limits until the target is reached or the seed budget is spent.
pub fn solve(
    parameters: &Parameters,
    target: &IkTarget,
    seed: &Joints,
    config: &SolverConfig,
) -> IkResult {
    let mut rng = rand::rng();
    let mut best: Option<IkResult> = None;
    let seeds = config.max_seeds.max(1);

    for attempt in 0..seeds {
        let start = if attempt == 0 {
            *seed
        } else {
            random_seed(parameters, &mut rng)
        };
        let mut result = descend(parameters, target, &start, config);
        result.seeds_tried = attempt + 1;
        if result.converged {
            return result;
        }
        debug!(
            attempt,
            position_error = result.position_error,
            angular_error = result.angular_error,
            "seed did not converge"
        );
        let better = match &best {
            None => true,
            Some(b) => score(&result) < score(b),
        };
        if better {
            best = Some(result);
        }
    }

    // Seed budget exhausted; report the closest attempt.
    let mut result = best.unwrap_or_else(|| descend(parameters, target, seed, config));
    result.seeds_tried = seeds;
    result
}

fn score(result: &IkResult) -> f64 {
    result.position_error + result.angular_error
}

/// A restart position drawn from the joint ranges, clipped to a single turn so
/// restarts do not wander into far winding branches.
pub(crate) fn random_seed(parameters: &Parameters, rng: &mut impl Rng) -> Joints {
    use std::f64::consts::PI;
    std::array::from_fn(|i| {
        let [lo, hi] = parameters.links[i].qlim;
        let lo = lo.max(-PI);
        let hi = hi.min(PI).max(lo);
        if hi > lo { rng.random_range(lo..=hi) } else { lo }
    })
}

/// One damped least squares descent from a single start position, no restarts.
/// Used directly when the caller manages its own seeding.
pub fn solve_from(
    parameters: &Parameters,
    target: &IkTarget,
    start: &Joints,
    config: &SolverConfig,
) -> IkResult {
    descend(parameters, target, start, config)
}

/// One damped least squares descent from a single start position.
fn descend(
    parameters: &Parameters,
    target: &IkTarget,
    start: &Joints,
    config: &SolverConfig,
) -> IkResult {
    let mut q = *start;
    let lambda2 = config.damping * config.damping;

    for iteration in 0..config.max_iterations {
        let frames = parameters.joint_frames(&q);
        let (position_error, angular_error, error) = pose_error(&frames[5], target);

        let converged = match target {
            IkTarget::Position(_) => position_error < config.tolerance,
            IkTarget::Pose(_) => {
                position_error < config.tolerance && angular_error < config.angular_tolerance
            }
        };
        if converged {
            return IkResult {
                joints: q,
                converged: true,
                iterations: iteration,
                seeds_tried: 1,
                position_error,
                angular_error,
            };
        }

        let jacobian = geometric_jacobian(parameters, &q, target.rows());
        let rows = jacobian.nrows();

        // dq = J^T (J J^T + lambda^2 I)^-1 * error
        let jjt = &jacobian * jacobian.transpose();
        let damped = jjt + DMatrix::identity(rows, rows) * lambda2;
        let Some(damped_inverse) = damped.try_inverse() else {
            // Singular even with damping; this descent cannot continue.
            return IkResult {
                joints: q,
                converged: false,
                iterations: iteration,
                seeds_tried: 1,
                position_error,
                angular_error,
            };
        };
        let dq = jacobian.transpose() * damped_inverse * error;

        for i in 0..6 {
            let [lo, hi] = parameters.links[i].qlim;
            q[i] = (q[i] + dq[i]).clamp(lo, hi);
        }
    }

    let frames = parameters.joint_frames(&q);
    let (position_error, angular_error, _) = pose_error(&frames[5], target);
    IkResult {
        joints: q,
        converged: false,
        iterations: config.max_iterations,
        seeds_tried: 1,
        position_error,
        angular_error,
    }
}

/// Error between the current flange pose and the target.
/// Returns (position error norm, orientation error norm, stacked error vector).
fn pose_error(current: &Pose, target: &IkTarget) -> (f64, f64, DVector<f64>) {
    match target {
        IkTarget::Position(position) => {
            let delta = position - current.translation.vector;
            let error = DVector::from_column_slice(&[delta.x, delta.y, delta.z]);
            (delta.norm(), 0.0, error)
        }
        IkTarget::Pose(pose) => {
            let delta = pose.translation.vector - current.translation.vector;
            let spin = orientation_error(&(pose.rotation * current.rotation.inverse()));
            let error = DVector::from_column_slice(&[
                delta.x, delta.y, delta.z, spin.x, spin.y, spin.z,
            ]);
            (delta.norm(), spin.norm(), error)
        }
    }
}

/// Orientation error as an axis * angle vector.
fn orientation_error(q: &UnitQuaternion<f64>) -> Vector3<f64> {
    match q.axis() {
        Some(axis) => axis.into_inner() * q.angle(),
        None => Vector3::zeros(),
    }
}

/// The geometric Jacobian of the flange for the current joint positions:
/// 3 x 6 for position-only targets, 6 x 6 (linear over angular) otherwise.
fn geometric_jacobian(parameters: &Parameters, q: &Joints, rows: usize) -> DMatrix<f64> {
    let frames = parameters.joint_frames(q);
    let flange = frames[5].translation.vector;
    let mut jacobian = DMatrix::zeros(rows, 6);

    for i in 0..6 {
        // Joint i acts about the z axis of the previous frame.
        let (origin, axis) = if i == 0 {
            (Vector3::zeros(), Vector3::z())
        } else {
            (
                frames[i - 1].translation.vector,
                frames[i - 1].rotation * Vector3::z(),
            )
        };

        match parameters.links[i].kind {
            JointKind::Prismatic => {
                // Linear velocity along the axis, no angular contribution.
                jacobian[(0, i)] = axis.x;
                jacobian[(1, i)] = axis.y;
                jacobian[(2, i)] = axis.z;
            }
            JointKind::Revolute => {
                let lever = flange - origin;
                let linear = axis.cross(&lever);
                jacobian[(0, i)] = linear.x;
                jacobian[(1, i)] = linear.y;
                jacobian[(2, i)] = linear.z;
                if rows == 6 {
                    jacobian[(3, i)] = axis.x;
                    jacobian[(4, i)] = axis.y;
                    jacobian[(5, i)] = axis.z;
                }
            }
        }
    }

    jacobian
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::dh_kinematics::Parameters;

    #[test]
    fn test_geometric_jacobian_base_joint() {
        // At the zero position of the IRB 120 the flange is at (0.374, 0, 0.63).
        // Rotating the base about z moves it along +y at the lever distance.
        let parameters = Parameters::abb_irb120();
        let jacobian = geometric_jacobian(&parameters, &[0.0; 6], 6);
        assert!((jacobian[(0, 0)] - 0.0).abs() < 1e-9);
        assert!((jacobian[(1, 0)] - 0.374).abs() < 1e-9);
        assert!((jacobian[(5, 0)] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_descend_converges_on_nearby_target() {
        let parameters = Parameters::abb_irb120();
        let goal: Joints = [0.1, -0.2, 0.3, -0.1, 0.25, 0.4];
        let pose = parameters.joint_frames(&goal)[5];
        let result = descend(
            &parameters,
            &IkTarget::Pose(pose),
            &[0.0; 6],
            &SolverConfig::default(),
        );
        assert!(result.converged, "residual {}", result.position_error);
        let reached = parameters.joint_frames(&result.joints)[5];
        assert!((reached.translation.vector - pose.translation.vector).norm() < 1e-5);
    }
}
