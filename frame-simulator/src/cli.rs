use clap::Parser;
use frame_simulator::SimulatorConfig;
use frame_simulator::config::DEFAULT_OUTPUT;
use frame_simulator::projector::EdgePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frame-simulator")]
#[command(version, about = "Generate a simulated DELTA camera frame ROM (.mif)")]
pub struct Cli {
    /// Memory initialization file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON photon table (built-in demo table if omitted)
    #[arg(short, long)]
    pub photons: Option<PathBuf>,

    /// What to do with charge landing outside the ROM
    #[arg(long, value_enum, default_value_t = EdgePolicy::Reject)]
    pub edge_policy: EdgePolicy,

    /// Also write a JSON run summary
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl From<Cli> for SimulatorConfig {
    fn from(cli: Cli) -> Self {
        SimulatorConfig {
            output: cli.output,
            photons: cli.photons,
            summary: cli.summary,
            edge_policy: cli.edge_policy,
        }
    }
}
