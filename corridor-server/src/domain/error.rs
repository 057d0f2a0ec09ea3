//! Domain error types.
//!
//! These errors represent seed data that would violate a registry
//! invariant. They are distinct from geometry and I/O errors.

use super::{RouteId, StopId};

/// Domain-level errors for registry construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Two stops share an identifier
    #[error("duplicate stop id {0}")]
    DuplicateStop(StopId),

    /// Two routes share an identifier
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),

    /// A route needs at least two stops to have a direction
    #[error("route {0} must have at least two stops")]
    RouteTooShort(RouteId),

    /// A route visits the same stop twice
    #[error("route {route} visits stop {stop} more than once")]
    RepeatedStop { route: RouteId, stop: StopId },

    /// A route or vehicle references a stop that does not exist
    #[error("unknown stop {0}")]
    UnknownStop(StopId),

    /// A vehicle references a route label that does not exist
    #[error("unknown route label {0:?}")]
    UnknownRouteLabel(String),

    /// A vehicle has neither a stop nor a coordinate
    #[error("vehicle {0} needs either at_stop or lat/lon")]
    VehicleWithoutPosition(String),
}
