//! DELTA camera frame simulator.
//!
//! Projects simulated photo-events onto the three rotated CCD readout axes,
//! accumulates them into a 128-word ROM bitmap and writes it as a
//! run-length compressed memory initialization file.
pub mod bitmap;
pub mod config;
pub mod encoder;
pub mod error;
pub mod mif_writer;
pub mod observer;
pub mod photons;
pub mod projector;
pub mod simulator;
pub mod summary;

pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use simulator::FrameSimulator;
