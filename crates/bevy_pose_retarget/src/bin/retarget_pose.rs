use std::path::PathBuf;

use bevy::log::info;
use bevy_pose_retarget::core::{
    capture::capture_pose, config::RetargetConfig, engine::Retargeter, pose_source::PoseSource,
    skeleton::Skeleton, state::RetargetState,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Applies a pose to a skeleton described in RON and prints the resulting local rotations as
/// a native pose source.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Skeleton description (`.ron`)
    #[arg(short, long)]
    skeleton: PathBuf,
    /// Pose source (`.json`)
    #[arg(short, long)]
    pose: PathBuf,
    /// Retarget config (`.retarget.ron`). Defaults are used if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut skeleton = Skeleton::load(&cli.skeleton)?;
    let pose = PoseSource::load(&cli.pose)?;
    let config = match &cli.config {
        Some(path) => RetargetConfig::load(path)?,
        None => RetargetConfig::default(),
    };

    let retargeter = Retargeter::new(config)?;
    let mut state = RetargetState::new();
    let summary = retargeter.apply(&mut skeleton, &mut state, &pose);
    info!(
        "Applied {} joints from a {:?} {:?} pose, skipped {}",
        summary.applied, pose.meta.source_kind, pose.meta.pose_kind, summary.skipped
    );

    let output = capture_pose(&skeleton, retargeter.config().input_quat_order);
    println!("{}", output.to_json_string()?);
    Ok(())
}
