/// Run configuration assembled from the command line
use crate::error::Result;
use crate::photons::PhotonTable;
use crate::projector::EdgePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ROM file name used by the bench tooling
pub const DEFAULT_OUTPUT: &str = "simu_rom.mif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Destination of the memory initialization file.
    pub output: PathBuf,
    /// JSON photon table. The built-in demo table is used when absent.
    pub photons: Option<PathBuf>,
    /// Optional JSON run summary.
    pub summary: Option<PathBuf>,
    /// Handling of hits that would address bits outside the ROM.
    pub edge_policy: EdgePolicy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            photons: None,
            summary: None,
            edge_policy: EdgePolicy::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn load_photons(&self) -> Result<PhotonTable> {
        match &self.photons {
            Some(path) => PhotonTable::from_json_file(path),
            None => Ok(PhotonTable::demo()),
        }
    }
}
