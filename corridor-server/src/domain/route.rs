//! Directional bus route type.
//!
//! A `Route` is an ordered sequence of stops. Index order is the direction
//! of travel; the opposite direction is a separate `Route`.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DomainError, Stop};

/// Opaque identifier for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus route travelling through its stops in index order.
///
/// # Invariants
///
/// - At least two stops
/// - No stop appears twice
#[derive(Debug, Clone)]
pub struct Route {
    id: RouteId,
    label: String,
    stops: Vec<Arc<Stop>>,
    color: String,
}

impl Route {
    /// Construct a route, validating its stop sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than two stops or a stop repeats.
    pub fn new(
        id: RouteId,
        label: impl Into<String>,
        stops: Vec<Arc<Stop>>,
        color: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::RouteTooShort(id));
        }

        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            if !seen.insert(stop.id()) {
                return Err(DomainError::RepeatedStop {
                    route: id,
                    stop: stop.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            label: label.into(),
            stops,
            color: color.into(),
        })
    }

    /// Build the opposite-direction route over the same stops.
    pub fn reversed(
        &self,
        id: RouteId,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            stops: self.stops.iter().rev().cloned().collect(),
            color: color.into(),
        }
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    /// Display label, e.g. "222C UP". Vehicles refer to routes by label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn stops(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    /// Number of stops on the route.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; a route has at least two stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Position of `stop` in travel order.
    pub fn index_of(&self, stop: &Stop) -> Option<usize> {
        self.stops.iter().position(|s| **s == *stop)
    }

    pub fn contains(&self, stop: &Stop) -> bool {
        self.index_of(stop).is_some()
    }

    /// Indices of `start` and `end` if the route travels from one to the other.
    ///
    /// Returns `None` when either stop is missing or `end` does not come
    /// strictly after `start`.
    pub fn directional_span(&self, start: &Stop, end: &Stop) -> Option<(usize, usize)> {
        let start_idx = self.index_of(start)?;
        let end_idx = self.index_of(end)?;
        (start_idx < end_idx).then_some((start_idx, end_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, StopId};

    fn stop(id: &str) -> Arc<Stop> {
        Arc::new(Stop::new(StopId::new(id), id.to_uppercase(), Coord::new(0.0, 0.0)))
    }

    fn abcd() -> Route {
        Route::new(
            RouteId::new("r"),
            "R UP",
            vec![stop("a"), stop("b"), stop("c"), stop("d")],
            "blue",
        )
        .unwrap()
    }

    #[test]
    fn construction_valid() {
        let route = abcd();
        assert_eq!(route.len(), 4);
        assert_eq!(route.label(), "R UP");
        assert_eq!(route.color(), "blue");
        assert!(!route.is_empty());
    }

    #[test]
    fn rejects_single_stop() {
        let result = Route::new(RouteId::new("r"), "R", vec![stop("a")], "red");
        assert_eq!(result.unwrap_err(), DomainError::RouteTooShort(RouteId::new("r")));
    }

    #[test]
    fn rejects_repeated_stop() {
        let result = Route::new(
            RouteId::new("r"),
            "R",
            vec![stop("a"), stop("b"), stop("a")],
            "red",
        );
        assert!(matches!(
            result,
            Err(DomainError::RepeatedStop { stop, .. }) if stop == StopId::new("a")
        ));
    }

    #[test]
    fn index_of_and_contains() {
        let route = abcd();
        assert_eq!(route.index_of(&stop("a")), Some(0));
        assert_eq!(route.index_of(&stop("d")), Some(3));
        assert_eq!(route.index_of(&stop("z")), None);
        assert!(route.contains(&stop("c")));
        assert!(!route.contains(&stop("z")));
    }

    #[test]
    fn directional_span_forward_only() {
        let route = abcd();
        assert_eq!(route.directional_span(&stop("b"), &stop("d")), Some((1, 3)));
        assert_eq!(route.directional_span(&stop("d"), &stop("b")), None);
        assert_eq!(route.directional_span(&stop("b"), &stop("b")), None);
        assert_eq!(route.directional_span(&stop("b"), &stop("z")), None);
    }

    #[test]
    fn reversed_route() {
        let up = abcd();
        let down = up.reversed(RouteId::new("r-down"), "R DOWN", "red");

        let ids: Vec<_> = down.stops().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["d", "c", "b", "a"]);
        assert_eq!(down.label(), "R DOWN");
        assert_eq!(down.directional_span(&stop("d"), &stop("b")), Some((0, 2)));
    }
}
