//! Cartesian trajectories: pose interpolation and solving pose paths to
//! joint space with warm-started inverse kinematics.

use crate::ik::{IkTarget, SolverConfig};
use crate::kinematic_traits::{Joints, Pose};
use crate::kinematics_impl::DHKinematics;
use crate::utils::{self, transition_costs};
use bitflags::bitflags;
use std::error::Error;
use std::fmt;
use tracing::{debug, info, warn};

/// Reasonable default transition costs. Rotation of smaller joints is more
/// tolerable. The sum of all weights is 6.0
pub const DEFAULT_TRANSITION_COSTS: [f64; 6] = [1.2, 1.1, 1.1, 0.9, 0.9, 0.8];

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct PoseFlags: u32 {
        /// A pose the caller asked for.
        const WAYPOINT = 0b00000001;
        /// A pose inserted between waypoints by interpolation.
        const INTERPOLATED = 0b00000010;
        /// First pose of the path.
        const START = 0b00000100;
        /// Last pose of the path.
        const FINISH = 0b00001000;
    }
}

/// A pose annotated with its role in the path.
#[derive(Clone, Copy)]
pub struct AnnotatedPose {
    pub pose: Pose,
    pub flags: PoseFlags,
}

impl fmt::Debug for AnnotatedPose {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn flag_representation(flags: &PoseFlags) -> String {
            const FLAG_MAP: &[(PoseFlags, &str)] = &[
                (PoseFlags::WAYPOINT, "WAYPOINT"),
                (PoseFlags::INTERPOLATED, "INTERPOLATED"),
                (PoseFlags::START, "START"),
                (PoseFlags::FINISH, "FINISH"),
            ];

            FLAG_MAP
                .iter()
                .filter(|(flag, _)| flags.contains(*flag))
                .map(|(_, name)| *name)
                .collect::<Vec<_>>()
                .join(" | ")
        }

        let translation = self.pose.translation.vector;
        let rotation = self.pose.rotation;

        write!(
            formatter,
            "{}: [{:.3}, {:.3}, {:.3}], quat {{ w: {:.3}, i: {:.3}, j: {:.3}, k: {:.3} }}",
            flag_representation(&self.flags),
            translation.x,
            translation.y,
            translation.z,
            rotation.w,
            rotation.i,
            rotation.j,
            rotation.k
        )
    }
}

/// Quintic time scaling: smooth progress 0..1 with zero boundary velocity and
/// acceleration.
fn time_scaling(u: f64) -> f64 {
    ((6.0 * u - 15.0) * u + 10.0) * u * u * u
}

/// Interpolates between two poses: translation along the straight line,
/// rotation by spherical interpolation, both under quintic time scaling.
/// Returns `steps` poses including both endpoints.
pub fn ctraj(start: &Pose, end: &Pose, steps: usize) -> Vec<Pose> {
    let steps = steps.max(2);
    let mut poses = Vec::with_capacity(steps);
    for k in 0..steps {
        let fraction = time_scaling(k as f64 / (steps - 1) as f64);
        let translation =
            start.translation.vector.lerp(&end.translation.vector, fraction);
        let rotation = start.rotation.slerp(&end.rotation, fraction);
        poses.push(Pose::from_parts(translation.into(), rotation));
    }
    poses
}

/// Runs [ctraj] over a chain of waypoints, annotating which poses were given
/// and which were inserted. Waypoints are not duplicated at the junctions.
pub fn ctraj_chain(waypoints: &[Pose], steps_per_segment: usize) -> Vec<AnnotatedPose> {
    let mut path: Vec<AnnotatedPose> = Vec::new();
    for window in waypoints.windows(2) {
        let segment = ctraj(&window[0], &window[1], steps_per_segment);
        let skip = usize::from(!path.is_empty());
        for (k, pose) in segment.iter().enumerate().skip(skip) {
            let flags = if k == 0 || k == segment.len() - 1 {
                PoseFlags::WAYPOINT
            } else {
                PoseFlags::INTERPOLATED
            };
            path.push(AnnotatedPose { pose: *pose, flags });
        }
    }
    if let Some(first) = path.first_mut() {
        first.flags |= PoseFlags::START;
    }
    if let Some(last) = path.last_mut() {
        last.flags |= PoseFlags::FINISH;
    }
    path
}

/// A pose along the path could not be solved within the joint limits and
/// transition budget.
#[derive(Debug)]
pub enum PathError {
    /// The solver did not converge for the pose at the given step.
    Unreachable { step: usize, pose: Pose },
    /// A solution was found but requires a joint jump above the budget.
    TransitionTooLarge { step: usize, cost: f64 },
    /// The path contains no poses.
    EmptyPath,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Unreachable { step, pose } => {
                let t = pose.translation.vector;
                write!(
                    f,
                    "pose {} at [{:.3}, {:.3}, {:.3}] is not reachable",
                    step, t.x, t.y, t.z
                )
            }
            PathError::TransitionTooLarge { step, cost } => write!(
                f,
                "transition into pose {} needs {:.1} degrees of joint motion",
                step,
                cost.to_degrees()
            ),
            PathError::EmptyPath => write!(f, "the path contains no poses"),
        }
    }
}

impl Error for PathError {}

/// Solves a Cartesian path to joint space, warm-starting every pose from the
/// previous solution so the arm does not flip between configurations mid-path.
pub struct CartesianPath<'a> {
    pub robot: &'a DHKinematics,

    /// Solver configuration used for each pose.
    pub solver: SolverConfig,

    /// Maximum allowed transition cost between adjacent solutions.
    pub max_transition_cost: f64,

    /// Transition cost coefficients (smaller joints are allowed to rotate more)
    pub transition_coefficients: Joints,

    /// If set, solutions for interpolated poses are included in the output.
    /// Otherwise they are discarded after checking; many robots do the
    /// Cartesian stroke between waypoints better on their own.
    pub include_interpolated: bool,
}

impl<'a> CartesianPath<'a> {
    pub fn new(robot: &'a DHKinematics) -> Self {
        CartesianPath {
            robot,
            solver: SolverConfig::default(),
            max_transition_cost: 6.0_f64.to_radians() * 6.0,
            transition_coefficients: DEFAULT_TRANSITION_COSTS,
            include_interpolated: true,
        }
    }

    pub fn transitionable(&self, from: &Joints, to: &Joints) -> bool {
        transition_costs(from, to, &self.transition_coefficients) <= self.max_transition_cost
    }

    /// Solves every pose of the path, starting from the `from` joint position.
    /// Returns the joint trace or the first failure.
    pub fn solve_path(
        &self,
        path: &[AnnotatedPose],
        from: &Joints,
    ) -> Result<Vec<Joints>, PathError> {
        if path.is_empty() {
            return Err(PathError::EmptyPath);
        }
        info!(poses = path.len(), "solving Cartesian path");

        let mut trace: Vec<Joints> = Vec::with_capacity(path.len());
        let mut previous = *from;

        for (step, annotated) in path.iter().enumerate() {
            let result = self.robot.solve(
                &IkTarget::Pose(annotated.pose),
                &previous,
                &self.solver,
            );
            if !result.converged {
                warn!(
                    step,
                    position_error = result.position_error,
                    "pose not reachable"
                );
                return Err(PathError::Unreachable {
                    step,
                    pose: annotated.pose,
                });
            }
            let cost = transition_costs(&previous, &result.joints, &self.transition_coefficients);
            if step > 0 && cost > self.max_transition_cost {
                utils::dump_joints(&previous);
                utils::dump_joints(&result.joints);
                return Err(PathError::TransitionTooLarge { step, cost });
            }
            debug!(step, iterations = result.iterations, "pose solved");

            if self.include_interpolated
                || !annotated.flags.contains(PoseFlags::INTERPOLATED)
            {
                trace.push(result.joints);
            }
            previous = result.joints;
        }
        Ok(trace)
    }
}
