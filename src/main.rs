//! Model inspector: prints Denavit-Hartenberg tables, computes forward poses
//! and solves target poses from the command line.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;
use std::path::PathBuf;

use rs_dh_kinematics::ik::{IkTarget, SolverConfig};
use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, JOINTS_AT_ZERO};
use rs_dh_kinematics::kinematics_impl::DHKinematics;
use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
use rs_dh_kinematics::utils::{as_radians, dump_joints, dump_pose, pose_xyz_rpy};

#[derive(Parser)]
#[command(name = "rs-dh-kinematics", about = "Serial arm kinematics from DH tables")]
struct Cli {
    /// Name of a built-in robot model: puma560, irb120, lrmate200id, kr5, cr3.
    #[arg(long, global = true)]
    robot: Option<String>,

    /// YAML robot description file (instead of a built-in model).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the Denavit-Hartenberg table of the model.
    Table,
    /// Forward kinematics: flange pose for the given joint angles.
    Forward {
        /// Six joint angles in degrees, comma separated.
        #[arg(long, allow_hyphen_values = true)]
        joints_deg: String,
    },
    /// Inverse kinematics: joint angles reaching the given pose.
    Inverse {
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long)]
        z: f64,
        /// Tool roll/pitch/yaw in degrees, comma separated. Omit to solve for
        /// the position only.
        #[arg(long, allow_hyphen_values = true)]
        rpy_deg: Option<String>,
        /// Joint angles in degrees to continue from (seed), comma separated.
        #[arg(long, allow_hyphen_values = true)]
        seed_deg: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let parameters = load_model(&cli)?;

    match cli.command {
        Command::Table => {
            print!("{}", parameters);
            println!("reach <= {:.3} m", parameters.reach());
        }
        Command::Forward { joints_deg } => {
            let joints = parse_joints(&joints_deg)?;
            let robot = DHKinematics::new(parameters);
            let frames = robot.forward_with_joint_poses(&joints);
            for (k, frame) in frames.iter().enumerate() {
                print!("T0{}  ", k + 1);
                dump_pose(frame);
            }
            println!("flange:");
            dump_pose(&robot.forward(&joints));
            if let Some(singularity) = robot.kinematic_singularity(&joints) {
                println!("warning: singular position ({:?})", singularity);
            }
        }
        Command::Inverse {
            x,
            y,
            z,
            rpy_deg,
            seed_deg,
        } => {
            let robot = DHKinematics::new_within_limits(parameters);
            let seed: Joints = match seed_deg {
                Some(text) => parse_joints(&text)?,
                None => JOINTS_AT_ZERO,
            };
            let target = match rpy_deg {
                Some(text) => {
                    let [roll, pitch, yaw] = parse_angles::<3>(&text)?.map(f64::to_radians);
                    IkTarget::Pose(pose_xyz_rpy(x, y, z, roll, pitch, yaw))
                }
                None => IkTarget::Position(Vector3::new(x, y, z)),
            };
            let result = robot.solve(&target, &seed, &SolverConfig::default());
            if !result.converged {
                bail!(
                    "no solution found ({} seeds, residual {:.6} m)",
                    result.seeds_tried,
                    result.position_error
                );
            }
            println!(
                "solved in {} iterations ({} seeds), residual {:.2e} m:",
                result.iterations, result.seeds_tried, result.position_error
            );
            dump_joints(&result.joints);
            println!("reached:");
            dump_pose(&robot.forward(&result.joints));
        }
    }
    Ok(())
}

fn load_model(cli: &Cli) -> Result<Parameters> {
    if let Some(file) = &cli.file {
        return Parameters::from_yaml_file(file)
            .with_context(|| format!("reading {}", file.display()));
    }
    let name = cli
        .robot
        .as_deref()
        .ok_or_else(|| anyhow!("specify --robot <name> or --file <path>"))?;
    match name.to_lowercase().as_str() {
        "puma560" => Ok(Parameters::puma560()),
        "irb120" => Ok(Parameters::abb_irb120()),
        "lrmate200id" => Ok(Parameters::lr_mate_200id()),
        "kr5" => Ok(Parameters::kuka_kr5()),
        "cr3" => Ok(Parameters::dobot_cr3()),
        other => bail!("unknown robot '{}'", other),
    }
}

fn parse_joints(text: &str) -> Result<Joints> {
    Ok(as_radians(parse_angles::<6>(text)?))
}

fn parse_angles<const N: usize>(text: &str) -> Result<[f64; N]> {
    let values: Vec<f64> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("parsing '{}'", text))?;
    let found = values.len();
    values
        .try_into()
        .map_err(|_| anyhow!("expected {} angles, found {}", N, found))
}
