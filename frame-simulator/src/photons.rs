/// Photo-event tables fed to the projector
use crate::error::{Result, SimulatorError};
use constants::memory::FRAME_COUNT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detector position of a single photo-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotonEvent {
    pub x: i32,
    pub y: i32,
}

impl PhotonEvent {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Photo-events grouped by frame. Frame `i` owns ROM rows `[64·i, 64·i + 64)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotonTable {
    frames: Vec<Vec<PhotonEvent>>,
}

/// Events used for the bench demo ROM, identical in both frames
const DEMO_EVENTS: [PhotonEvent; 3] = [
    PhotonEvent::new(200, 400),
    PhotonEvent::new(300, 200),
    PhotonEvent::new(400, 300),
];

impl PhotonTable {
    /// Build a table, refusing more frames than the ROM holds.
    pub fn new(frames: Vec<Vec<PhotonEvent>>) -> Result<Self> {
        if frames.len() > FRAME_COUNT {
            let reason = format!("{} frames given, ROM holds {}", frames.len(), FRAME_COUNT);
            return Err(SimulatorError::InvalidPhotonTable(reason));
        }
        Ok(Self { frames })
    }

    /// Table used when no fixture is supplied
    pub fn demo() -> Self {
        Self {
            frames: vec![DEMO_EVENTS.to_vec(); FRAME_COUNT],
        }
    }

    /// Parse a table from its JSON form: `{"frames": [[{"x": .., "y": ..}, ..], ..]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: PhotonTable = serde_json::from_str(json)?;
        Self::new(table.frames)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| SimulatorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn frames(&self) -> &[Vec<PhotonEvent>] {
        &self.frames
    }

    /// Iterate `(frame, event)` pairs in frame order.
    pub fn events(&self) -> impl Iterator<Item = (usize, &PhotonEvent)> {
        self.frames
            .iter()
            .enumerate()
            .flat_map(|(frame, events)| events.iter().map(move |event| (frame, event)))
    }

    pub fn event_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }
}
