/// DELTA camera frame simulator entry point
mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use frame_simulator::{FrameSimulator, SimulatorConfig};
use log::info;

fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = SimulatorConfig::from(Cli::parse());
    info!("Configuration: {:?}", config);

    let simulator = FrameSimulator::new(config)
        .context("Failed to load photon table")?;
    simulator.run().context("Frame simulation failed")?;

    info!("Simulation complete!");
    Ok(())
}
