/// Frame simulator orchestrating projection, encoding and ROM output.
use crate::bitmap::FrameBitmap;
use crate::config::SimulatorConfig;
use crate::encoder::{Listing, encode};
use crate::error::{Result, SimulatorError};
use crate::mif_writer::write_mif_file;
use crate::observer::{ProjectionObserver, ProjectionTrace, TraceLogger};
use crate::photons::PhotonTable;
use crate::projector::{ProjectionStats, Projector};
use crate::summary::RunSummary;
use constants::coordinate_system::AXIS_COUNT;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// One-shot ROM generator for a photon table.
pub struct FrameSimulator {
    config: SimulatorConfig,
    photons: PhotonTable,
}

impl FrameSimulator {
    /// Create a simulator, loading the photon table named by the config.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        let photons = config.load_photons()?;
        Ok(Self::with_photons(config, photons))
    }

    pub fn with_photons(config: SimulatorConfig, photons: PhotonTable) -> Self {
        Self { config, photons }
    }

    /// Executes the complete pipeline: project, encode, verify, write.
    /// Nothing is written unless every stage succeeds. The summary goes out
    /// before the ROM, so a ROM on disk always has its summary.
    pub fn run(&self) -> Result<RunSummary> {
        info!(
            "Simulating {} photo-events over {} frames into {}",
            self.photons.event_count(),
            self.photons.frames().len(),
            self.config.output.display()
        );

        let mut bitmap = FrameBitmap::new();
        let stats = self.project(&mut bitmap)?;

        let listing = encode(&bitmap);
        self.verify_listing(&bitmap, &listing)?;

        let summary = RunSummary::new(
            &self.config.output,
            self.config.edge_policy,
            &self.photons,
            &bitmap,
            stats,
            &listing,
        );
        if let Some(path) = &self.config.summary {
            summary.write(path)?;
        }

        write_mif_file(&self.config.output, &listing)?;
        info!(
            "Saved {} (MIF, {} entries)",
            self.config.output.display(),
            listing.len()
        );
        summary.log();

        Ok(summary)
    }

    /// Projection pass with progress tracking and per-hit trace logging.
    fn project(&self, bitmap: &mut FrameBitmap) -> Result<ProjectionStats> {
        let pb = ProgressBar::new((self.photons.event_count() * AXIS_COUNT) as u64);
        pb.set_style(progress_style());
        pb.set_message("Projecting photo-events");

        let mut tracer = TraceLogger;
        let mut observe = |trace: &ProjectionTrace| {
            tracer.on_projection(trace);
            pb.inc(1);
        };
        let projector = Projector::new(self.config.edge_policy);
        let result = projector.project_table(&self.photons, bitmap, &mut observe);

        match result {
            Ok(stats) => {
                pb.finish_with_message("Photo-events projected");
                Ok(stats)
            }
            Err(err) => {
                pb.abandon_with_message("Projection aborted");
                Err(err.into())
            }
        }
    }

    /// The listing must expand back to exactly the projected bitmap.
    fn verify_listing(&self, bitmap: &FrameBitmap, listing: &Listing) -> Result<()> {
        if listing.expand()? != *bitmap {
            return Err(SimulatorError::ListingMismatch);
        }
        Ok(())
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{bar:40.green/blue}] {pos}/{len} hits ({percent}%) {msg}")
        .map(|style| style.progress_chars("▉▊▋▌▍▎▏ "))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}
