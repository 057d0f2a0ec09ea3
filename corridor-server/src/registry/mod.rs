//! Stop, route and vehicle registries.
//!
//! The registry is built once at startup (from a JSON seed file or the
//! built-in corridor) and is read-only afterwards. It is shared behind an
//! `Arc` and injected into the resolver, so tests can use synthetic data.

mod corridor;
mod error;
mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Route, Stop, StopId, Vehicle};

pub use corridor::gurugram_222c;
pub use error::SeedError;
pub use seed::{RouteSeed, Seed, StopSeed, VehicleSeed};

/// Immutable catalog of the corridor's stops, routes and vehicles.
///
/// Iteration order is the order the entities were supplied in.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    stops: Vec<Arc<Stop>>,
    routes: Vec<Route>,
    vehicles: Vec<Vehicle>,
    by_id: HashMap<StopId, usize>,
}

impl Registry {
    /// Assemble a registry from already-validated entities.
    ///
    /// Stop ids must be unique; callers outside the crate go through
    /// [`Seed::into_registry`], which rejects duplicates.
    pub(crate) fn new(
        stops: Vec<Arc<Stop>>,
        routes: Vec<Route>,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        let by_id: HashMap<StopId, usize> = stops
            .iter()
            .enumerate()
            .map(|(idx, stop)| (stop.id().clone(), idx))
            .collect();
        debug_assert_eq!(by_id.len(), stops.len(), "duplicate stop ids in registry");

        Self {
            stops,
            routes,
            vehicles,
            by_id,
        }
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stops(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Look up a stop by identifier.
    pub fn stop(&self, id: &StopId) -> Option<&Arc<Stop>> {
        self.by_id.get(id).map(|&idx| &self.stops[idx])
    }

    /// Look up a route by its display label.
    pub fn route_by_label(&self, label: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.label() == label)
    }

    /// Vehicles operating the route with the given label.
    pub fn vehicles_on<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Vehicle> + 'a {
        self.vehicles.iter().filter(move |v| v.route_label == label)
    }

    /// Search stops by name.
    ///
    /// Case-insensitive substring match. Stops whose name starts with the
    /// query come first; otherwise registry order is kept.
    pub fn search_stops(&self, query: &str, limit: usize) -> Vec<Arc<Stop>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, &Arc<Stop>)> = self
            .stops
            .iter()
            .filter_map(|stop| {
                let name = stop.name().to_lowercase();
                name.contains(&query)
                    .then(|| (!name.starts_with(&query), stop))
            })
            .collect();

        // Stable sort keeps registry order within each group.
        matches.sort_by_key(|(not_prefix, _)| *not_prefix);
        matches
            .into_iter()
            .take(limit)
            .map(|(_, stop)| Arc::clone(stop))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
