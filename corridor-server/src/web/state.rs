//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedGeometryClient;
use crate::geometry::GeometryBackend;
use crate::planner::ResolverConfig;
use crate::registry::Registry;

/// Geometry provider used by the server: the startup-selected backend
/// behind the polyline cache.
pub type SharedGeometry = CachedGeometryClient<GeometryBackend>;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stops, routes and buses
    pub registry: Arc<Registry>,

    /// Cached road geometry provider
    pub geometry: Arc<SharedGeometry>,

    /// Resolver configuration
    pub config: Arc<ResolverConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(registry: Registry, geometry: SharedGeometry, config: ResolverConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            geometry: Arc::new(geometry),
            config: Arc::new(config),
        }
    }
}
