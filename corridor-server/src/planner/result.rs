//! Resolution output types.

use std::sync::Arc;

use crate::domain::{Coord, Stop};

use super::SegmentStatus;

/// One travel leg between two stops, with its road path.
#[derive(Debug, Clone)]
pub struct RouteSegment {
    pub route_label: String,
    pub from: Arc<Stop>,
    pub to: Arc<Stop>,
    /// Road-following path, endpoints included.
    pub path: Vec<Coord>,
    pub color: String,
    pub status: SegmentStatus,
}

/// Outcome of a successful resolution.
///
/// A direct result covers every segment of the route it uses; a transfer
/// result has exactly two segments and a stop count of zero.
#[derive(Debug, Clone)]
pub struct RouteResult {
    /// Stops travelled (end index minus start index) for direct results.
    pub stop_count: usize,
    pub segments: Vec<RouteSegment>,
}

impl RouteResult {
    /// Label of the route the first segment runs on.
    pub fn route_label(&self) -> Option<&str> {
        self.segments.first().map(|s| s.route_label.as_str())
    }

    /// Segments the rider actually rides.
    pub fn journey_segments(&self) -> impl Iterator<Item = &RouteSegment> {
        self.segments
            .iter()
            .filter(|s| s.status == SegmentStatus::Journey)
    }

    /// True when the result changes bus part-way.
    pub fn is_transfer(&self) -> bool {
        self.segments
            .windows(2)
            .any(|w| w[0].route_label != w[1].route_label)
    }
}
