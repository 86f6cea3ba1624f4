//! Implements the Kinematics trait for robots described by a
//! Denavit-Hartenberg table.

use crate::constraints::Constraints;
use crate::ik::{self, IkResult, IkTarget, SolverConfig};
use crate::kinematic_traits::{
    Joints, Kinematics, Pose, Singularity, Solutions, JOINTS_AT_ZERO,
};
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::transition_costs;
use nalgebra::Vector3;

/// Two solutions closer than this (largest joint difference, radians) are the
/// same solution reached twice.
const DISTINCT_SOLUTION: f64 = 1e-4;

/// Joint axes with |cos| above this are treated as parallel.
const ALIGNED_AXES: f64 = 1.0 - 1e-9;

/// Kinematics of a serial arm given by its Denavit-Hartenberg parameters.
/// Inverse kinematics is numerical (damped least squares with restarts); all
/// returned solutions converged, so they are already cross-checked against the
/// forward kinematics by construction.
pub struct DHKinematics {
    parameters: Parameters,
    constraints: Option<Constraints>,
    config: SolverConfig,
}

impl DHKinematics {
    /// Creates a new `DHKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        DHKinematics {
            parameters,
            constraints: None,
            config: SolverConfig::default(),
        }
    }

    /// Creates an instance that only returns solutions compliant with the
    /// given constraints.
    pub fn new_with_constraints(parameters: Parameters, constraints: Constraints) -> Self {
        DHKinematics {
            parameters,
            constraints: Some(constraints),
            config: SolverConfig::default(),
        }
    }

    /// Creates an instance constrained to the joint limits of the table itself.
    pub fn new_within_limits(parameters: Parameters) -> Self {
        let constraints = Constraints::from_parameters(&parameters);
        Self::new_with_constraints(parameters, constraints)
    }

    /// Replaces the default solver configuration.
    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn constraints(&self) -> &Option<Constraints> {
        &self.constraints
    }

    /// Full-control solve: target (pose or position only), seed and solver
    /// configuration. This is the surface behind the trait's `inverse_*`
    /// methods; use it when the tolerances or budgets of a single call matter.
    pub fn solve(&self, target: &IkTarget, seed: &Joints, config: &SolverConfig) -> IkResult {
        ik::solve(&self.parameters, target, seed, config)
    }

    /// All distinct converged solutions for the pose, sorted by proximity to
    /// `previous`.
    fn solutions(&self, pose: &Pose, previous: &Joints) -> Solutions {
        let target = IkTarget::Pose(*pose);
        let mut rng = rand::rng();
        let mut found: Solutions = Vec::new();

        for attempt in 0..self.config.max_seeds.max(1) {
            let start = match attempt {
                0 => *previous,
                1 => match &self.constraints {
                    Some(constraints) => *constraints.centers(),
                    None => JOINTS_AT_ZERO,
                },
                _ => ik::random_seed(&self.parameters, &mut rng),
            };
            let result = ik::solve_from(&self.parameters, &target, &start, &self.config);
            if !result.converged {
                continue;
            }
            if let Some(constraints) = &self.constraints {
                if !constraints.compliant(&result.joints) {
                    continue;
                }
            }
            let duplicate = found.iter().any(|known| {
                transition_costs(known, &result.joints, &[1.0; 6]) < DISTINCT_SOLUTION
            });
            if !duplicate {
                found.push(result.joints);
            }
        }

        found.sort_by(|a, b| {
            let ca = transition_costs(previous, a, &[1.0; 6]);
            let cb = transition_costs(previous, b, &[1.0; 6]);
            ca.total_cmp(&cb)
        });
        found
    }
}

impl Kinematics for DHKinematics {
    fn inverse(&self, pose: &Pose) -> Solutions {
        self.solutions(pose, &JOINTS_AT_ZERO)
    }

    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions {
        self.solutions(pose, previous)
    }

    fn forward(&self, qs: &Joints) -> Pose {
        self.parameters.joint_frames(qs)[5]
    }

    fn forward_with_joint_poses(&self, joints: &Joints) -> [Pose; 6] {
        self.parameters.joint_frames(joints)
    }

    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity> {
        // J4 turns about the z axis of frame 3, J6 about the z axis of frame 5.
        // When these become parallel their rotations act on the same axis.
        let frames = self.parameters.joint_frames(qs);
        let z4 = frames[2].rotation * Vector3::z();
        let z6 = frames[4].rotation * Vector3::z();
        if z4.dot(&z6).abs() > ALIGNED_AXES {
            Some(Singularity::Aligned)
        } else {
            None
        }
    }
}
