//! Segment classification relative to the bus and the rider.

use serde::{Deserialize, Serialize};

/// Rider-relative status of one stop-to-stop segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStatus {
    /// Behind the bus.
    Passed,
    /// Between the bus and the rider's stop.
    Approaching,
    /// The rider's ride.
    Journey,
    /// Past the rider's destination.
    Remaining,
}

impl SegmentStatus {
    /// Classify the segment starting at route index `index`.
    ///
    /// Assumes `vehicle_idx <= start_idx < end_idx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use corridor_server::planner::SegmentStatus;
    ///
    /// // Bus at 1, rider boards at 2 and alights at 3.
    /// assert_eq!(SegmentStatus::classify(0, 1, 2, 3), SegmentStatus::Passed);
    /// assert_eq!(SegmentStatus::classify(1, 1, 2, 3), SegmentStatus::Approaching);
    /// assert_eq!(SegmentStatus::classify(2, 1, 2, 3), SegmentStatus::Journey);
    /// assert_eq!(SegmentStatus::classify(3, 1, 2, 3), SegmentStatus::Remaining);
    /// ```
    pub fn classify(index: usize, vehicle_idx: usize, start_idx: usize, end_idx: usize) -> Self {
        if index < vehicle_idx {
            SegmentStatus::Passed
        } else if index < start_idx {
            SegmentStatus::Approaching
        } else if index < end_idx {
            SegmentStatus::Journey
        } else {
            SegmentStatus::Remaining
        }
    }

    /// Suggested stroke colour for map rendering.
    pub fn display_color(self) -> &'static str {
        match self {
            SegmentStatus::Passed | SegmentStatus::Remaining => "gray",
            SegmentStatus::Approaching => "orange",
            SegmentStatus::Journey => "blue",
        }
    }

    /// Whether the segment is still ahead of the rider's arrival.
    pub fn is_upcoming(self) -> bool {
        matches!(self, SegmentStatus::Approaching | SegmentStatus::Journey)
    }
}
