//! JSON seed format for the registry.
//!
//! ```json
//! {
//!   "stops":    [{ "id": "stand", "name": "Gurugram Bus Stand", "lat": 28.46524, "lon": 77.03174 }],
//!   "routes":   [{ "id": "222c-up", "label": "222C UP", "color": "blue", "stops": ["stand", "..."] }],
//!   "vehicles": [{ "id": "bus-1", "route": "222C UP", "direction": "UP", "at_stop": "stand" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Coord, DomainError, Route, RouteId, Stop, StopId, Vehicle, VehicleId};

use super::Registry;
use super::error::SeedError;

/// Top-level seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub stops: Vec<StopSeed>,
    #[serde(default)]
    pub routes: Vec<RouteSeed>,
    #[serde(default)]
    pub vehicles: Vec<VehicleSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopSeed {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSeed {
    pub id: String,
    pub label: String,
    pub color: String,
    /// Stop ids in direction of travel.
    pub stops: Vec<String>,
}

/// A vehicle placed either at a stop or at an explicit coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSeed {
    pub id: String,
    /// Route label, not route id.
    pub route: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl Seed {
    /// Parse a seed document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the seed and build a registry from it.
    pub fn into_registry(self) -> Result<Registry, DomainError> {
        let mut stops: Vec<Arc<Stop>> = Vec::with_capacity(self.stops.len());
        let mut stop_ids = HashSet::new();
        for s in self.stops {
            let id = StopId::new(s.id);
            if !stop_ids.insert(id.clone()) {
                return Err(DomainError::DuplicateStop(id));
            }
            stops.push(Arc::new(Stop::new(id, s.name, Coord::new(s.lat, s.lon))));
        }

        let lookup = |id: &str| -> Result<Arc<Stop>, DomainError> {
            let id = StopId::new(id);
            stops
                .iter()
                .find(|s| s.id() == &id)
                .cloned()
                .ok_or(DomainError::UnknownStop(id))
        };

        let mut routes = Vec::with_capacity(self.routes.len());
        let mut route_ids = HashSet::new();
        for r in self.routes {
            let id = RouteId::new(r.id);
            if !route_ids.insert(id.clone()) {
                return Err(DomainError::DuplicateRoute(id));
            }
            let route_stops = r
                .stops
                .iter()
                .map(|s| lookup(s.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            routes.push(Route::new(id, r.label, route_stops, r.color)?);
        }

        let mut vehicles = Vec::with_capacity(self.vehicles.len());
        for v in self.vehicles {
            if !routes.iter().any(|r: &Route| r.label() == v.route) {
                return Err(DomainError::UnknownRouteLabel(v.route));
            }
            let coord = match (&v.at_stop, v.lat, v.lon) {
                (Some(stop), _, _) => lookup(stop.as_str())?.coord(),
                (None, Some(lat), Some(lon)) => Coord::new(lat, lon),
                _ => return Err(DomainError::VehicleWithoutPosition(v.id)),
            };
            vehicles.push(Vehicle::new(VehicleId::new(v.id), v.route, coord, v.direction));
        }

        Ok(Registry::new(stops, routes, vehicles))
    }
}

impl Registry {
    /// Build a registry from seed JSON text.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(Seed::from_json(json)?.into_registry()?)
    }

    /// Load a registry from a JSON seed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
