/// Photo-event projection onto the three rotated CCD readout axes
use crate::bitmap::FrameBitmap;
use crate::observer::{ProjectionObserver, ProjectionTrace};
use crate::photons::{PhotonEvent, PhotonTable};
use clap::ValueEnum;
use constants::coordinate_system::{
    AXIS_COUNT, ROW_PITCH, SEGMENT_WIDTH, project_onto_axis, projected_range,
};
use constants::lane::lane_base;
use constants::memory::{DEPTH, FRAME_COUNT, frame_bias};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with hits that would address bits outside the ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Abort the run with a `ProjectionError`.
    #[default]
    Reject,
    /// Drop the offending bits and keep going.
    Clip,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("axis {0} does not exist")]
    UnknownAxis(usize),

    #[error("frame {0} does not exist")]
    UnknownFrame(usize),

    #[error(
        "photon ({x}, {y}) in frame {frame} projects to {p_int} on axis {axis}, outside 0..{limit}",
        limit = projected_range()
    )]
    OutOfRange {
        x: i32,
        y: i32,
        frame: usize,
        axis: usize,
        p_int: i32,
    },

    #[error(
        "photon ({x}, {y}) in frame {frame} spreads charge to row {row} on axis {axis}, outside 0..{depth}",
        depth = DEPTH
    )]
    RowOutOfBounds {
        x: i32,
        y: i32,
        frame: usize,
        axis: usize,
        row: isize,
    },
}

/// Charge-sharing patterns indexed by phase: (row offset, lane offset from the hit's base lane)
const CHARGE_SPREAD: [&[(isize, usize)]; 4] = [
    &[(-1, 1), (0, 0), (0, 1)],
    &[(0, 0), (0, 1)],
    &[(0, 0), (0, 1), (1, 0)],
    &[(0, 1), (1, 0)],
];

/// Discrete ROM address of a photon on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisHit {
    pub frame: usize,
    pub axis: usize,
    /// Projected coordinate before flooring
    pub projected: f32,
    pub p_int: i32,
    pub segment: usize,
    /// Absolute ROM row, frame bias included
    pub row: usize,
    pub lane_base: usize,
    /// Position within the row's 4-unit bucket
    pub phase: usize,
}

impl AxisHit {
    /// (row, lane) pairs receiving charge. Rows may fall outside the ROM at the edges.
    pub fn charge_spread(&self) -> impl Iterator<Item = (isize, usize)> + '_ {
        CHARGE_SPREAD[self.phase]
            .iter()
            .map(move |&(dr, dl)| (self.row as isize + dr, self.lane_base + dl))
    }
}

/// Project `photon` of `frame` onto `axis`. Pure: no bitmap access.
pub fn project(
    photon: &PhotonEvent,
    axis: usize,
    frame: usize,
) -> Result<AxisHit, ProjectionError> {
    if axis >= AXIS_COUNT {
        return Err(ProjectionError::UnknownAxis(axis));
    }
    if frame >= FRAME_COUNT {
        return Err(ProjectionError::UnknownFrame(frame));
    }

    let projected = project_onto_axis(photon.x, photon.y, axis);
    let p_int = projected.floor() as i32;
    if !(0..projected_range()).contains(&p_int) {
        return Err(ProjectionError::OutOfRange {
            x: photon.x,
            y: photon.y,
            frame,
            axis,
            p_int,
        });
    }

    let segment = p_int / SEGMENT_WIDTH;
    let offset = p_int - SEGMENT_WIDTH * segment;
    let segment = segment as usize;

    Ok(AxisHit {
        frame,
        axis,
        projected,
        p_int,
        segment,
        row: (offset / ROW_PITCH) as usize + frame_bias(frame),
        lane_base: lane_base(axis, segment),
        phase: (offset % ROW_PITCH) as usize,
    })
}

/// Counters gathered over one projection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    /// Photon-axis pairs that produced a hit
    pub hits: usize,
    /// Lane writes performed (repeated writes to a set bit included)
    pub lane_writes: usize,
    /// Photon-axis pairs discarded for projecting outside the segments
    pub dropped_hits: usize,
    /// Lane writes discarded at the ROM edges
    pub dropped_bits: usize,
}

/// Accumulates photon hits into a frame bitmap.
pub struct Projector {
    edge_policy: EdgePolicy,
}

impl Projector {
    pub fn new(edge_policy: EdgePolicy) -> Self {
        Self { edge_policy }
    }

    /// Project every event of `table` on every axis into `bitmap`.
    /// Bits are OR-ed in, so the pass is additive and idempotent.
    pub fn project_table<O: ProjectionObserver>(
        &self,
        table: &PhotonTable,
        bitmap: &mut FrameBitmap,
        observer: &mut O,
    ) -> Result<ProjectionStats, ProjectionError> {
        let mut stats = ProjectionStats::default();

        for (frame, photon) in table.events() {
            for axis in 0..AXIS_COUNT {
                let hit = match project(photon, axis, frame) {
                    Ok(hit) => hit,
                    Err(err @ ProjectionError::OutOfRange { .. })
                        if self.edge_policy == EdgePolicy::Clip =>
                    {
                        warn!("Dropping hit: {}", err);
                        stats.dropped_hits += 1;
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                observer.on_projection(&ProjectionTrace {
                    photon: *photon,
                    hit,
                });
                self.apply_hit(photon, &hit, bitmap, &mut stats)?;
            }
        }

        info!(
            "Projected {} events: {} hits, {} lane writes",
            table.event_count(),
            stats.hits,
            stats.lane_writes
        );
        if stats.dropped_hits + stats.dropped_bits > 0 {
            warn!(
                "Clipped {} hits and {} bits at the ROM edges",
                stats.dropped_hits, stats.dropped_bits
            );
        }

        Ok(stats)
    }

    /// Write one hit's charge spread. Under `Reject` nothing is written unless every
    /// addressed row exists.
    fn apply_hit(
        &self,
        photon: &PhotonEvent,
        hit: &AxisHit,
        bitmap: &mut FrameBitmap,
        stats: &mut ProjectionStats,
    ) -> Result<(), ProjectionError> {
        if self.edge_policy == EdgePolicy::Reject {
            if let Some((row, _)) = hit
                .charge_spread()
                .find(|&(row, _)| !(0..DEPTH as isize).contains(&row))
            {
                return Err(ProjectionError::RowOutOfBounds {
                    x: photon.x,
                    y: photon.y,
                    frame: hit.frame,
                    axis: hit.axis,
                    row,
                });
            }
        }

        stats.hits += 1;
        for (row, lane) in hit.charge_spread() {
            let written = match usize::try_from(row) {
                Ok(row) => bitmap.set_lane(row, lane),
                Err(_) => false,
            };
            if written {
                stats.lane_writes += 1;
            } else {
                warn!(
                    "Dropping lane {} at row {} for photon ({}, {}) axis {}",
                    lane, row, photon.x, photon.y, hit.axis
                );
                stats.dropped_bits += 1;
            }
        }

        Ok(())
    }
}
