//! Road geometry providers.
//!
//! A geometry provider turns two coordinates into a polyline that follows
//! the road between them. The resolver only sees the [`GeometryProvider`]
//! trait; implementations are:
//!
//! - [`GeometryClient`]: HTTP client for an OSRM-compatible server
//! - [`MockGeometryClient`]: canned polylines loaded from a JSON file
//! - [`crate::cache::CachedGeometryClient`]: caching wrapper for either
//!
//! [`GeometryBackend`] picks one of the two at startup.

mod backend;
mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::domain::Coord;

pub use backend::GeometryBackend;
pub use client::{GeometryClient, GeometryConfig};
pub use error::GeometryError;
pub use mock::{MockGeometryClient, PathFixture};
pub use types::{LineString, OsrmRoute, RouteResponse};

/// Travel-mode hint passed to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Pedestrian routing snaps to the road without detours around dividers.
    #[default]
    Walking,
    Driving,
}

impl TravelMode {
    /// OSRM profile name.
    pub fn osrm_profile(self) -> &'static str {
        match self {
            TravelMode::Walking => "foot",
            TravelMode::Driving => "driving",
        }
    }
}

/// Source of road-following paths between two points.
///
/// Implementations may fail freely; callers are expected to fall back to a
/// straight segment.
pub trait GeometryProvider: Send + Sync {
    /// Fetch the road path from `from` to `to`, endpoints included.
    fn directions(
        &self,
        from: Coord,
        to: Coord,
        mode: TravelMode,
    ) -> impl Future<Output = Result<Vec<Coord>, GeometryError>> + Send;
}
