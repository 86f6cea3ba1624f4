//! Provides the visualization window with sliders for joint angles and the
//! tool center point.
//!
//! The robot body is synthesized from the parameter table (ball joints and
//! cylindrical links), so any Denavit-Hartenberg model can be displayed
//! without mesh files. Joint sliders drive forward kinematics; the TCP
//! sliders ask the inverse kinematics for a matching joint position and leave
//! the robot in place when no solution exists.
//!
//! ```no_run
//! use rs_dh_kinematics::kinematics_impl::DHKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//! use rs_dh_kinematics::visualization;
//!
//! fn main() {
//!     let robot = DHKinematics::new_within_limits(Parameters::abb_irb120());
//!
//!     // Joint angles to display the robot in at the start, in degrees
//!     let initial_angles = [0., 90., 0., 0., 0., 0.];
//!
//!     // Boundaries for the XYZ drawbars in the visualization GUI
//!     let tcp_box = [-0.8..=0.8, -0.8..=0.8, 0.0..=1.0];
//!
//!     visualization::visualize_robot(robot, initial_angles, tcp_box);
//! }
//! ```
//!
//! Visualization serves as a verification tool to ensure the parameter table
//! is correct, rather than as a production feature.

use crate::camera_controller::{camera_controller_system, CameraController};
use crate::kinematic_traits::{Joints, Kinematics, Pose};
use crate::kinematics_impl::DHKinematics;
use crate::robot_body;
use crate::utils;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use nalgebra::{Isometry3, Translation3, UnitQuaternion};
use std::ops::RangeInclusive;

/// Data to store the current joint angles and TCP as they are shown in the
/// control panel
#[derive(Resource)]
struct RobotControls {
    joint_angles: [f32; 6],
    limits_deg: [[f32; 2]; 6],
    tcp: [f64; 6],
    tcp_box: [RangeInclusive<f64>; 3],
    previous_joint_angles: [f32; 6],
    previous_tcp: [f64; 6],
}

impl RobotControls {
    fn set_tcp_from_pose(&mut self, pose: &Isometry3<f64>) {
        let (roll, pitch, yaw) = pose.rotation.euler_angles();
        self.tcp = [
            pose.translation.x,
            pose.translation.y,
            pose.translation.z,
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees(),
        ];
    }

    fn pose(&self) -> Pose {
        Isometry3::from_parts(
            Translation3::new(self.tcp[0], self.tcp[1], self.tcp[2]),
            UnitQuaternion::from_euler_angles(
                self.tcp[3].to_radians(),
                self.tcp[4].to_radians(),
                self.tcp[5].to_radians(),
            ),
        )
    }
}

// Resource to store the current robot instance
#[derive(Resource)]
struct Robot {
    kinematics: DHKinematics,
    joint_meshes: Option<[Handle<Mesh>; 6]>, // Precomputed body segments
    material: Option<Handle<StandardMaterial>>,
    base: Option<Handle<Mesh>>,
    base_material: Option<Handle<StandardMaterial>>,
}

/// Joint trajectory being played back, when the window was opened with
/// [visualize_trajectory].
#[derive(Resource)]
struct Playback {
    trajectory: Vec<Joints>,
    timer: Timer,
    index: usize,
}

/// TCP positions of the whole trajectory, drawn as a strip.
#[derive(Resource, Default)]
struct TcpTrace {
    points: Vec<Vec3>,
}

/// Visualize the given robot, starting from the given initial angles (given in
/// degrees). The sliders for specifying the tool center point location take
/// the boundaries from the tcp_box (given in meters). Bevy will be used for
/// visualization.
pub fn visualize_robot(
    robot: DHKinematics,
    initial_angles: [f32; 6],
    tcp_box: [RangeInclusive<f64>; 3],
) {
    App::new()
        .add_plugins((DefaultPlugins, EguiPlugin))
        .insert_resource(controls_for(&robot, initial_angles, tcp_box))
        .insert_resource(Robot {
            kinematics: robot,
            joint_meshes: None,
            material: None,
            base: None,
            base_material: None,
        })
        .add_systems(Startup, setup)
        .add_systems(Update, (update_robot, camera_controller_system, control_panel))
        .run();
}

/// Plays the joint trajectory back in a loop, one configuration every `dt`
/// seconds, drawing the TCP trace as the robot moves.
pub fn visualize_trajectory(robot: DHKinematics, trajectory: Vec<Joints>, dt: f32) {
    if trajectory.is_empty() {
        return;
    }
    let points = trajectory
        .iter()
        .map(|q| {
            let p = robot.forward(q).translation;
            Vec3::new(p.x as f32, p.y as f32, p.z as f32)
        })
        .collect();
    let initial = utils::to_degrees(&trajectory[0]);
    let reach = robot.parameters().reach();
    let tcp_box = [-reach..=reach, -reach..=reach, -0.2 * reach..=reach];

    App::new()
        .add_plugins((DefaultPlugins, EguiPlugin))
        .insert_resource(controls_for(&robot, initial, tcp_box))
        .insert_resource(Robot {
            kinematics: robot,
            joint_meshes: None,
            material: None,
            base: None,
            base_material: None,
        })
        .insert_resource(Playback {
            trajectory,
            timer: Timer::from_seconds(dt, TimerMode::Repeating),
            index: 0,
        })
        .insert_resource(TcpTrace { points })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (advance_playback, update_robot, camera_controller_system, draw_trace),
        )
        .run();
}

fn controls_for(
    robot: &DHKinematics,
    initial_angles: [f32; 6],
    tcp_box: [RangeInclusive<f64>; 3],
) -> RobotControls {
    let limits_deg = std::array::from_fn(|i| {
        let [lo, hi] = robot.parameters().links[i].qlim;
        [lo.to_degrees() as f32, hi.to_degrees() as f32]
    });
    RobotControls {
        joint_angles: initial_angles,
        limits_deg,
        tcp: [0.0; 6],
        tcp_box,
        previous_joint_angles: initial_angles,
        previous_tcp: [0.0; 6],
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut robot_controls: ResMut<RobotControls>,
    mut robot: ResMut<Robot>,
) {
    let reach = robot.kinematics.parameters().reach() as f32;
    let joint_radius = (0.035 * reach).max(0.01);
    let link_radius = (0.022 * reach).max(0.006);

    // Segment k connects this joint frame back to the previous one; that
    // attachment point is constant in the local frame, so each mesh is built
    // once and only re-posed afterwards.
    let segments: [Handle<Mesh>; 6] = std::array::from_fn(|k| {
        let link = &robot.kinematics.parameters().links[k];
        let rear = link.transform(0.0).inverse() * nalgebra::Point3::origin();
        meshes.add(robot_body::joint_mesh(
            Vec3::new(rear.x as f32, rear.y as f32, rear.z as f32),
            joint_radius,
            link_radius,
        ))
    });
    robot.joint_meshes = Some(segments);
    robot.base = Some(meshes.add(robot_body::pedestal_mesh(0.12 * reach)));

    robot.material = Some(materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 0.0),
        metallic: 0.7,
        perceptual_roughness: 0.1,
        ..default()
    }));
    robot.base_material = Some(materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.5, 0.5),
        metallic: 1.0,
        perceptual_roughness: 1.0,
        ..default()
    }));

    // Show the robot in the initial position.
    let angles = utils::joints(&robot_controls.joint_angles);
    visualize_robot_joints(&mut commands, &robot, &angles);
    let cartesian = robot.kinematics.forward(&angles);
    robot_controls.set_tcp_from_pose(&cartesian);

    // Add camera and light
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 30000.0,
            ..default()
        },
        transform: Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 30000.0,
            ..default()
        },
        transform: Transform::from_xyz(-5.0, 0.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn((
        Camera3dBundle {
            transform: Transform {
                translation: Vec3::new(0.0, 3.0 * reach, reach),
                rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                ..default()
            },
            ..default()
        },
        CameraController {
            distance: 3.0 * reach,
            pan_target: Vec3::new(0.0, 0.0, 0.5 * reach),
            ..default()
        },
    ));
}

/// Spawns the body segments of the robot at the poses the joint angles put
/// them in.
fn visualize_robot_joints(commands: &mut Commands, robot: &ResMut<Robot>, angles: &Joints) {
    fn as_bevy(transform: &Pose) -> (Vec3, Quat) {
        let translation = transform.translation.vector;
        let rotation = transform.rotation;
        (
            Vec3::new(
                translation.x as f32,
                translation.y as f32,
                translation.z as f32,
            ),
            Quat::from_xyzw(
                rotation.i as f32,
                rotation.j as f32,
                rotation.k as f32,
                rotation.w as f32,
            ),
        )
    }

    fn spawn_segment(
        commands: &mut Commands,
        mesh: &Handle<Mesh>,
        material: Handle<StandardMaterial>,
        pose: &Pose,
    ) {
        let (translation, rotation) = as_bevy(pose);
        commands.spawn(PbrBundle {
            mesh: mesh.clone(),
            material,
            transform: Transform {
                translation,
                rotation,
                ..default()
            },
            ..default()
        });
    }

    let frames = robot.kinematics.forward_with_joint_poses(angles);
    if let (Some(segments), Some(material)) = (&robot.joint_meshes, &robot.material) {
        for (k, frame) in frames.iter().enumerate() {
            spawn_segment(commands, &segments[k], material.clone(), frame);
        }
    }
    if let (Some(base), Some(material)) = (&robot.base, &robot.base_material) {
        spawn_segment(commands, base, material.clone(), &Pose::identity());
    }
}

// Update the robot when joint angles or the TCP request change
fn update_robot(
    mut commands: Commands,
    mut controls: ResMut<RobotControls>,
    robot: ResMut<Robot>,
    query: Query<Entity, With<Handle<Mesh>>>,
) {
    if controls.joint_angles != controls.previous_joint_angles {
        // Despawn the existing visualized robot joints
        for entity in query.iter() {
            commands.entity(entity).despawn();
        }

        // Revisualize the robot joints with the updated joint angles
        let angles = utils::joints(&controls.joint_angles);
        visualize_robot_joints(&mut commands, &robot, &angles);
        controls.previous_joint_angles = controls.joint_angles;

        // Update the TCP position shown in the panel
        let pose = robot.kinematics.forward(&angles);
        controls.set_tcp_from_pose(&pose);
        controls.previous_tcp = controls.tcp;
    } else if controls.tcp != controls.previous_tcp {
        let angles = utils::joints(&controls.joint_angles);
        let pose = controls.pose();

        // Inverse kinematics continuing from the displayed position; the
        // closest solution wins.
        let ik = robot.kinematics.inverse_continuing(&pose, &angles);
        if let Some(solution) = ik.first() {
            for entity in query.iter() {
                commands.entity(entity).despawn();
            }
            visualize_robot_joints(&mut commands, &robot, solution);
            controls.joint_angles = utils::to_degrees(solution);
        } else {
            println!(
                "  no solution for pose {:.2} {:.2} {:.2} rotation {:.1} {:.1} {:.1}",
                controls.tcp[0],
                controls.tcp[1],
                controls.tcp[2],
                controls.tcp[3],
                controls.tcp[4],
                controls.tcp[5]
            );
        }
        controls.previous_tcp = controls.tcp;
        controls.previous_joint_angles = controls.joint_angles;
    }
}

// Control panel for adjusting joint angles and tool center point
fn control_panel(mut egui_contexts: EguiContexts, mut controls: ResMut<RobotControls>) {
    let limits = controls.limits_deg;
    let tcp_x_range = controls.tcp_box[0].clone();
    let tcp_y_range = controls.tcp_box[1].clone();
    let tcp_z_range = controls.tcp_box[2].clone();

    egui::Window::new("Robot Controls").show(egui_contexts.ctx_mut(), |ui| {
        ui.label("Joint rotations");
        for (i, angle) in controls.joint_angles.iter_mut().enumerate() {
            ui.add(
                egui::Slider::new(angle, limits[i][0]..=limits[i][1])
                    .text(format!("Joint {}", i + 1)),
            );
        }

        ui.add_space(10.0);
        ui.label("Tool center point (TCP)");
        ui.add(egui::Slider::new(&mut controls.tcp[0], tcp_x_range).text("X"));
        ui.add(egui::Slider::new(&mut controls.tcp[1], tcp_y_range).text("Y"));
        ui.add(egui::Slider::new(&mut controls.tcp[2], tcp_z_range).text("Z"));

        ui.add_space(10.0);
        ui.label("TCP Euler angles");
        ui.add(egui::Slider::new(&mut controls.tcp[3], -180.0..=180.0).text("Roll"));
        ui.add(egui::Slider::new(&mut controls.tcp[4], -180.0..=180.0).text("Pitch"));
        ui.add(egui::Slider::new(&mut controls.tcp[5], -180.0..=180.0).text("Yaw"));
    });
}

// Step the playback: the next configuration of the trajectory is applied by
// writing the joint sliders, update_robot does the rest.
fn advance_playback(
    time: Res<Time>,
    mut playback: ResMut<Playback>,
    mut controls: ResMut<RobotControls>,
) {
    playback.timer.tick(time.delta());
    if playback.timer.just_finished() {
        playback.index = (playback.index + 1) % playback.trajectory.len();
        let configuration = playback.trajectory[playback.index];
        controls.joint_angles = utils::to_degrees(&configuration);
    }
}

fn draw_trace(mut gizmos: Gizmos, trace: Res<TcpTrace>) {
    if trace.points.len() > 1 {
        gizmos.linestrip(trace.points.iter().copied(), Color::srgb(0.9, 0.2, 0.2));
    }
}
