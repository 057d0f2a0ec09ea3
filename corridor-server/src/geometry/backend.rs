//! Runtime choice between the live and offline providers.

use crate::domain::Coord;

use super::error::GeometryError;
use super::{GeometryClient, GeometryProvider, MockGeometryClient, TravelMode};

/// Geometry provider selected at startup.
pub enum GeometryBackend {
    /// OSRM-compatible HTTP server.
    Osrm(GeometryClient),
    /// Canned polylines from a fixture file.
    Fixtures(MockGeometryClient),
}

impl GeometryBackend {
    /// Short name for startup logging.
    pub fn kind(&self) -> &'static str {
        match self {
            GeometryBackend::Osrm(_) => "osrm",
            GeometryBackend::Fixtures(_) => "fixtures",
        }
    }
}

impl GeometryProvider for GeometryBackend {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        match self {
            GeometryBackend::Osrm(client) => client.directions(from, to, mode).await,
            GeometryBackend::Fixtures(mock) => mock.directions(from, to, mode).await,
        }
    }
}
