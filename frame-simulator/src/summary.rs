/// Run summary written next to the ROM for bench bookkeeping.
use crate::bitmap::FrameBitmap;
use crate::encoder::Listing;
use crate::error::{Result, SimulatorError};
use crate::photons::PhotonTable;
use crate::projector::{EdgePolicy, ProjectionStats};
use constants::memory::{DEPTH, FRAME_COUNT, ROWS_PER_FRAME, WORD_WIDTH, frame_bias};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-frame occupancy of the ROM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub frame: usize,
    pub photon_count: usize,
    /// ROM rows of this frame holding at least one set lane
    pub rows_with_hits: usize,
    pub bits_set: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub width: usize,
    pub depth: usize,
    pub edge_policy: EdgePolicy,
    pub frames: Vec<FrameSummary>,
    pub projection: ProjectionStats,
    pub listing_entries: usize,
    pub zero_runs: usize,
}

impl RunSummary {
    pub fn new(
        output: &Path,
        edge_policy: EdgePolicy,
        photons: &PhotonTable,
        bitmap: &FrameBitmap,
        projection: ProjectionStats,
        listing: &Listing,
    ) -> Self {
        let frames = (0..FRAME_COUNT)
            .map(|frame| {
                let rows = frame_bias(frame)..frame_bias(frame) + ROWS_PER_FRAME;
                FrameSummary {
                    frame,
                    photon_count: photons.frames().get(frame).map_or(0, Vec::len),
                    rows_with_hits: bitmap.non_zero_rows_in(rows.clone()),
                    bits_set: bitmap.bits_set_in(rows),
                }
            })
            .collect();

        Self {
            output: output.to_path_buf(),
            width: WORD_WIDTH,
            depth: DEPTH,
            edge_policy,
            frames,
            projection,
            listing_entries: listing.len(),
            zero_runs: listing.zero_runs(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SimulatorError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved {}", path.display());
        Ok(())
    }

    /// Log the key figures of the run.
    pub fn log(&self) {
        info!("ROM summary:");
        info!(
            "  Output: {} ({}x{} bits)",
            self.output.display(),
            self.depth,
            self.width
        );
        for frame in &self.frames {
            info!(
                "  Frame {}: {} photo-events, {} rows hit, {} bits set",
                frame.frame, frame.photon_count, frame.rows_with_hits, frame.bits_set
            );
        }
        info!(
            "  Listing: {} entries ({} zero runs)",
            self.listing_entries, self.zero_runs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::observer::NullObserver;
    use crate::projector::Projector;

    fn demo_summary() -> RunSummary {
        let photons = PhotonTable::demo();
        let mut bitmap = FrameBitmap::new();
        let stats = Projector::new(EdgePolicy::Reject)
            .project_table(&photons, &mut bitmap, &mut NullObserver)
            .unwrap();
        let listing = encode(&bitmap);
        RunSummary::new(
            Path::new("simu_rom.mif"),
            EdgePolicy::Reject,
            &photons,
            &bitmap,
            stats,
            &listing,
        )
    }

    #[test_log::test]
    fn demo_frames_are_identical() {
        let summary = demo_summary();
        assert_eq!(summary.frames.len(), 2);
        assert_eq!(summary.frames[0].photon_count, 3);
        assert_eq!(summary.frames[0].rows_with_hits, 16);
        assert_eq!(summary.frames[0].bits_set, 24);
        assert_eq!(summary.frames[1].rows_with_hits, summary.frames[0].rows_with_hits);
        assert_eq!(summary.frames[1].bits_set, summary.frames[0].bits_set);
        assert_eq!(summary.listing_entries, 45);
        assert_eq!(summary.projection.hits, 18);
        assert_eq!(summary.projection.dropped_bits, 0);
    }

    #[test_log::test]
    fn summary_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        demo_summary().write(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["width"], 12);
        assert_eq!(json["depth"], 128);
        assert_eq!(json["edge_policy"], "reject");
        assert_eq!(json["frames"][1]["frame"], 1);
    }
}
