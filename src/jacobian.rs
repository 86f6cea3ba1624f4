//! Numerical Jacobian of the end effector with velocity and torque mappings.

extern crate nalgebra as na;
use crate::kinematic_traits::{Joints, Kinematics};
use crate::utils::vector6_to_joints;
use na::linalg::SVD;
use na::{Isometry3, Matrix6, Vector6};
use rayon::prelude::*;

/// Struct representing the Jacobian matrix
pub struct Jacobian {
    /// A 6x6 matrix representing the Jacobian
    ///
    /// The Jacobian matrix maps the joint velocities to the end-effector
    /// velocities. Each column corresponds to a joint, each row to a degree of
    /// freedom of the end-effector (linear and angular velocities).
    matrix: Matrix6<f64>,

    /// The disturbance value used for computing the Jacobian
    epsilon: f64,
}

impl Jacobian {
    /// Computes the Jacobian for the given robot and joint configuration,
    /// using `epsilon` as the numerical differentiation step.
    pub fn new(robot: &(impl Kinematics + Sync), qs: &Joints, epsilon: f64) -> Self {
        let matrix = compute_jacobian(robot, qs, epsilon);
        Self { matrix, epsilon }
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.matrix
    }

    /// Computes the joint velocities required to achieve a desired
    /// end-effector velocity, given as an isometry whose translation is the
    /// linear and whose rotation is the angular velocity.
    ///
    /// Returns joint positions with values representing joint velocities
    /// rather than angles, or an error message if the computation fails.
    pub fn velocities(
        &self,
        desired_end_effector_velocity: &Isometry3<f64>,
    ) -> Result<Joints, &'static str> {
        let linear_velocity = desired_end_effector_velocity.translation.vector;
        let angular_velocity = desired_end_effector_velocity.rotation.scaled_axis();

        let desired_velocity = Vector6::new(
            linear_velocity.x,
            linear_velocity.y,
            linear_velocity.z,
            angular_velocity.x,
            angular_velocity.y,
            angular_velocity.z,
        );

        self.velocities_from_vector(&desired_velocity)
    }

    /// Computes the joint velocities for a desired end-effector velocity given
    /// as a 6D vector. Uses the inverse of the Jacobian when it exists and the
    /// SVD pseudoinverse otherwise (near singularities).
    pub fn velocities_from_vector(
        &self,
        desired_end_effector_velocity: &Vector6<f64>,
    ) -> Result<Joints, &'static str> {
        let joint_velocities: Vector6<f64>;
        if let Some(jacobian_inverse) = self.matrix.try_inverse() {
            joint_velocities = jacobian_inverse * desired_end_effector_velocity;
        } else {
            let svd = SVD::new(self.matrix, true, true);
            match svd.pseudo_inverse(self.epsilon) {
                Ok(jacobian_pseudoinverse) => {
                    joint_velocities = jacobian_pseudoinverse * desired_end_effector_velocity;
                }
                Err(_) => {
                    return Err("Unable to compute the pseudoinverse of the Jacobian matrix");
                }
            }
        }
        Ok(vector6_to_joints(joint_velocities))
    }

    /// Computes the joint torques required to achieve a desired end-effector
    /// force/torque, given as an isometry whose translation represents force
    /// and whose rotation represents torque.
    pub fn torques(&self, desired_force_torque: &Isometry3<f64>) -> Joints {
        let linear_force = desired_force_torque.translation.vector;
        let angular_torque = desired_force_torque.rotation.scaled_axis();

        let desired_force_torque_vector = Vector6::new(
            linear_force.x,
            linear_force.y,
            linear_force.z,
            angular_torque.x,
            angular_torque.y,
            angular_torque.z,
        );

        let joint_torques = self.matrix.transpose() * desired_force_torque_vector;
        vector6_to_joints(joint_torques)
    }

    /// Computes the joint torques for a desired end-effector force/torque
    /// given as a 6D vector.
    pub fn torques_from_vector(&self, desired_force_torque: &Vector6<f64>) -> Joints {
        let joint_torques = self.matrix.transpose() * desired_force_torque;
        vector6_to_joints(joint_torques)
    }
}

/// Computes the Jacobian matrix by numerical differentiation: each column is
/// the pose change from disturbing one joint by `epsilon`. Columns are
/// computed in parallel.
pub fn compute_jacobian(
    robot: &(impl Kinematics + Sync),
    joints: &Joints,
    epsilon: f64,
) -> Matrix6<f64> {
    let mut jacobian = Matrix6::zeros();
    let current_pose = robot.forward(joints);
    let current_position = current_pose.translation.vector;
    let current_orientation = current_pose.rotation;

    let jacobian_columns: Vec<_> = (0..6)
        .into_par_iter()
        .map(|i| {
            let mut perturbed_qs = *joints;
            perturbed_qs[i] += epsilon;
            let perturbed_pose = robot.forward(&perturbed_qs);
            let perturbed_position = perturbed_pose.translation.vector;
            let perturbed_orientation = perturbed_pose.rotation;

            let delta_position = (perturbed_position - current_position) / epsilon;
            let delta_orientation =
                (perturbed_orientation * current_orientation.inverse()).scaled_axis() / epsilon;

            (delta_position, delta_orientation)
        })
        .collect();

    for (i, (delta_position, delta_orientation)) in jacobian_columns.into_iter().enumerate() {
        jacobian.fixed_view_mut::<3, 1>(0, i).copy_from(&delta_position);
        jacobian.fixed_view_mut::<3, 1>(3, i).copy_from(&delta_orientation);
    }

    jacobian
}
