use std::path::PathBuf;
use thiserror::Error;

use crate::encoder::ListingError;
use crate::projector::ProjectionError;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Invalid listing: {0}")]
    Listing(#[from] ListingError),

    #[error("Listing does not reproduce the projected bitmap")]
    ListingMismatch,

    #[error("Invalid photon table: {0}")]
    InvalidPhotonTable(String),

    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulatorError>;
