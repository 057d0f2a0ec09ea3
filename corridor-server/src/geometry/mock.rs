//! Mock geometry client for running without a routing server.
//!
//! Loads canned polylines from a JSON file and serves them as if they
//! were live provider responses.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::{AT_STOP_TOLERANCE_DEG, Coord};

use super::error::GeometryError;
use super::{GeometryProvider, TravelMode};

/// A recorded path between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFixture {
    pub from: Coord,
    pub to: Coord,
    pub path: Vec<Coord>,
}

/// Mock geometry client that serves fixtures from a JSON file.
///
/// Endpoints match within the at-stop tolerance; the travel mode is
/// ignored. Unknown pairs answer `NoRoute`.
#[derive(Clone, Default)]
pub struct MockGeometryClient {
    fixtures: Arc<RwLock<Vec<PathFixture>>>,
}

impl MockGeometryClient {
    /// Create a mock client from in-memory fixtures.
    pub fn from_fixtures(fixtures: Vec<PathFixture>) -> Self {
        Self {
            fixtures: Arc::new(RwLock::new(fixtures)),
        }
    }

    /// Create a mock client by loading a JSON array of fixtures.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        Ok(Self::from_fixtures(read_fixtures(path.as_ref())?))
    }

    /// Number of loaded fixtures.
    pub async fn len(&self) -> usize {
        self.fixtures.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fixtures.read().await.is_empty()
    }

    /// Reload fixtures from disk (useful for development).
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<(), GeometryError> {
        let fresh = read_fixtures(path.as_ref())?;
        *self.fixtures.write().await = fresh;
        Ok(())
    }
}

fn read_fixtures(path: &Path) -> Result<Vec<PathFixture>, GeometryError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        GeometryError::NotConfigured(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&json).map_err(|e| GeometryError::Json {
        message: e.to_string(),
        body: None,
    })
}

impl GeometryProvider for MockGeometryClient {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        _mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        let fixtures = self.fixtures.read().await;
        fixtures
            .iter()
            .find(|f| {
                f.from.within(&from, AT_STOP_TOLERANCE_DEG) && f.to.within(&to, AT_STOP_TOLERANCE_DEG)
            })
            .map(|f| f.path.clone())
            .ok_or(GeometryError::NoRoute)
    }
}
