//! Static bus positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coord, Route};

/// Opaque identifier for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus pinned to a route label at a fixed coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Label of the route this bus operates, e.g. "222C UP".
    pub route_label: String,
    pub coord: Coord,
    /// Free-form direction tag ("UP"/"DOWN"); informational only.
    pub direction: String,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        route_label: impl Into<String>,
        coord: Coord,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            id,
            route_label: route_label.into(),
            coord,
            direction: direction.into(),
        }
    }

    /// Returns true if this bus operates `route`.
    pub fn operates(&self, route: &Route) -> bool {
        self.route_label == route.label()
    }

    /// Indices of the stops on `route` this bus is located at.
    ///
    /// Usually zero or one index; several when stops coincide.
    pub fn stop_indices<'a>(
        &'a self,
        route: &'a Route,
        tolerance_deg: f64,
    ) -> impl Iterator<Item = usize> + 'a {
        route
            .stops()
            .iter()
            .enumerate()
            .filter(move |(_, stop)| self.coord.within(&stop.coord(), tolerance_deg))
            .map(|(idx, _)| idx)
    }
}
