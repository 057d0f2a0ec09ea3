//! Resolver configuration.

use std::time::Duration;

use crate::domain::AT_STOP_TOLERANCE_DEG;
use crate::geometry::TravelMode;

/// Configuration parameters for route resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Deadline for a single geometry call (milliseconds).
    /// Expiry is treated like any other provider failure.
    pub geometry_timeout_ms: u64,

    /// Maximum number of segment geometries fetched in parallel
    /// when building a direct result.
    pub batch_size: usize,

    /// Travel-mode hint passed to the geometry provider.
    pub travel_mode: TravelMode,

    /// Endpoints closer than this on both axes (degrees) skip the
    /// provider and use a straight segment.
    pub short_circuit_deg: f64,

    /// A vehicle is at a stop when both axes are within this (degrees).
    pub vehicle_tolerance_deg: f64,
}

impl ResolverConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        geometry_timeout_ms: u64,
        batch_size: usize,
        travel_mode: TravelMode,
        short_circuit_deg: f64,
        vehicle_tolerance_deg: f64,
    ) -> Self {
        Self {
            geometry_timeout_ms,
            batch_size,
            travel_mode,
            short_circuit_deg,
            vehicle_tolerance_deg,
        }
    }

    /// Returns the geometry timeout as a Duration.
    pub fn geometry_timeout(&self) -> Duration {
        Duration::from_millis(self.geometry_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            geometry_timeout_ms: 5_000,
            batch_size: 8,
            travel_mode: TravelMode::Walking,
            short_circuit_deg: 0.0005, // ~55 m
            vehicle_tolerance_deg: AT_STOP_TOLERANCE_DEG,
        }
    }
}
