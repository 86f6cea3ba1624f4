//! Rust implementation of forward and inverse kinematic solutions for serial
//! industrial robots described by Denavit-Hartenberg parameter tables, with
//! joint-space and Cartesian trajectory generation.
//!
//! Any six-joint arm whose geometry fits the standard Denavit-Hartenberg
//! convention (one rotation and one translation about z, then one translation
//! and one rotation about x, per joint) can be modelled by filling out a
//! [parameters::dh_kinematics::Parameters] table. Several well known arms
//! (ABB IRB 120, Fanuc LR Mate 200iD, Kuka KR5, Dobot CR3, Puma 560) ship as
//! ready presets. Inverse kinematics is numerical: a damped least squares
//! (Levenberg-Marquardt) descent over the geometric Jacobian with random
//! restarts inside the joint limits, so it works for any table, not only for
//! wrists that decouple analytically.
//!
//! # Features
//!
//! - All returned inverse kinematics solutions converged against the forward
//!   kinematics; there are no "almost" solutions.
//! - Solutions can be checked against joint constraints, and are sorted by
//!   proximity to the previous joint positions (closest first), keeping
//!   trajectories from flipping between arm configurations.
//! - Position-only solving for tasks where tool orientation is free.
//! - Quintic joint trajectories, via-point trajectories with velocity limits
//!   and blending, and Cartesian pose interpolation with warm-started solving.
//! - Jacobian: velocities and torques from the numerical Jacobian.
//! - The robot can be equipped with the tool and placed on the base, planning
//!   for the desired location and orientation of the tool center point (TCP)
//!   rather than any part of the robot.
//! - Robot models load from YAML files (optional).
//! - Interactive visualization with joint and TCP sliders, and trajectory
//!   playback (optional).
//!
//! ## Examples
//!
//! The demos directory walks through the typical uses:
//!
//! - **forward_kinematics.rs**: building a model and reading flange poses.
//! - **inverse_kinematics.rs**: solving a target pose, tolerances and budgets.
//! - **joint_trajectory.rs**: quintic sweeps through joint configurations.
//! - **cube_path.rs**: via-point trajectory traced with position-only solving.
//! - **cartesian_path.rs**: pose-to-pose interpolation solved to joint space.
//! - **teach.rs**, **animate.rs**: visualization (requires the
//!   `visualization` feature).

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod ik;

pub mod jacobian;

pub mod tool;

#[path = "path_plan/trajectory.rs"]
pub mod trajectory;

#[path = "path_plan/multi_segment.rs"]
pub mod multi_segment;

#[path = "path_plan/cartesian.rs"]
pub mod cartesian;

#[path = "visualize/visualization.rs"]
#[cfg(feature = "visualization")]
pub mod visualization;

#[path = "visualize/robot_body.rs"]
#[cfg(feature = "visualization")]
mod robot_body;

#[path = "visualize/camera_controller.rs"]
#[cfg(feature = "visualization")]
mod camera_controller;

#[cfg(test)]
mod tests;
