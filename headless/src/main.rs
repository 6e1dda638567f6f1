mod run_file;
mod run_state;

use std::path::PathBuf;

use clap::Parser;

use crate::run_state::RunState;

/// Replays a run file against a single robot and reports where it ends up.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML run file: starting pose, sensors and commands.
    run_file: PathBuf,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut run = RunState::load(&args.run_file)?;
    run.run();

    let failed = run.readings.iter().filter(|r| r.result.is_err()).count();
    if failed > 0 {
        log::warn!("{failed} of {} reads failed", run.readings.len());
    }

    let pose = run.robot.pose();
    println!(
        "position: ({}, {})  orientation: {} rad  speed: {}",
        pose.position.x,
        pose.position.y,
        pose.orientation,
        run.robot.speed()
    );
    for record in &run.readings {
        match &record.result {
            Ok(reading) => println!("step {}: {reading}", record.step),
            Err(e) => println!("step {}: error: {e}", record.step),
        }
    }

    Ok(())
}
