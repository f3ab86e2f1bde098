/// Diagnostic side channel for the projection pass
use crate::photons::PhotonEvent;
use crate::projector::AxisHit;
use log::debug;
use std::fmt;

/// What the projector computed for one photon on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionTrace {
    pub photon: PhotonEvent,
    pub hit: AxisHit,
}

impl fmt::Display for ProjectionTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} => p={:.6} p_int={} seg={} row={}",
            self.photon.x,
            self.photon.y,
            self.hit.projected,
            self.hit.p_int,
            self.hit.segment,
            self.hit.row
        )
    }
}

/// Receives one trace per photon and axis, before the hit is written.
pub trait ProjectionObserver {
    fn on_projection(&mut self, trace: &ProjectionTrace);
}

impl<F> ProjectionObserver for F
where
    F: FnMut(&ProjectionTrace),
{
    fn on_projection(&mut self, trace: &ProjectionTrace) {
        self(trace)
    }
}

/// Discards every trace.
pub struct NullObserver;

impl ProjectionObserver for NullObserver {
    fn on_projection(&mut self, _trace: &ProjectionTrace) {}
}

/// Logs every trace at debug level.
pub struct TraceLogger;

impl ProjectionObserver for TraceLogger {
    fn on_projection(&mut self, trace: &ProjectionTrace) {
        debug!(
            "axis {} frame {}: {}",
            trace.hit.axis, trace.hit.frame, trace
        );
    }
}
