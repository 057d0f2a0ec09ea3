//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coord, Route, Stop, Vehicle};
use crate::planner::{RouteResult, RouteSegment, SegmentStatus};

/// A stop in listings and results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopResult {
    /// Stop identifier
    pub id: String,

    /// Display name
    pub name: String,

    pub lat: f64,
    pub lon: f64,
}

/// Response listing stops.
#[derive(Debug, Serialize)]
pub struct StopListResponse {
    pub stops: Vec<StopResult>,
}

/// Request to search stops by name.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search query
    pub q: String,

    /// Maximum number of results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Request for the stop nearest a position.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: f64,
    pub lon: f64,
}

/// A route with its stop sequence.
#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub id: String,

    /// Display label, e.g. "222C UP"
    pub label: String,

    pub color: String,

    /// Stop identifiers in travel order
    pub stops: Vec<String>,
}

/// Response listing routes.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteInfo>,
}

/// Request to list vehicles.
#[derive(Debug, Deserialize)]
pub struct VehicleQuery {
    /// Optional route label filter
    pub route: Option<String>,
}

/// A bus and where it is parked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleResult {
    pub id: String,

    /// Label of the route it operates
    pub route: String,

    pub direction: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response listing vehicles.
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<VehicleResult>,
}

/// Request to resolve a journey.
///
/// Exactly one of `start` and `position` must be given.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Destination stop id
    pub end: String,

    /// Boarding stop id
    pub start: Option<String>,

    /// Rider position, snapped to the nearest stop
    pub position: Option<Coord>,
}

/// One stop-to-stop segment of a resolved journey.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// Label of the route this segment runs on
    pub route: String,

    pub from: StopResult,
    pub to: StopResult,

    /// Road-following path, endpoints included
    pub path: Vec<Coord>,

    /// Route colour
    pub color: String,

    pub status: SegmentStatus,

    /// Stroke colour for the status
    pub status_color: String,

    /// Whether the segment is approaching or part of the ride
    pub upcoming: bool,
}

/// A resolved journey.
#[derive(Debug, Serialize)]
pub struct ResolvedRoute {
    /// Label of the first segment's route
    pub route_label: Option<String>,

    /// Stops travelled; zero for transfers
    pub stop_count: usize,

    /// Whether the journey changes bus
    pub transfer: bool,

    pub segments: Vec<SegmentResult>,
}

/// Response for journey resolution.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// The journey, or null when no route connects the stops
    pub route: Option<ResolvedRoute>,

    /// Buses on the journey's route
    pub vehicles: Vec<VehicleResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Stop> for StopResult {
    fn from(stop: &Stop) -> Self {
        let coord = stop.coord();
        Self {
            id: stop.id().to_string(),
            name: stop.name().to_string(),
            lat: coord.lat,
            lon: coord.lon,
        }
    }
}

impl From<&Route> for RouteInfo {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id().to_string(),
            label: route.label().to_string(),
            color: route.color().to_string(),
            stops: route.stops().iter().map(|s| s.id().to_string()).collect(),
        }
    }
}

impl From<&Vehicle> for VehicleResult {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            route: vehicle.route_label.clone(),
            direction: vehicle.direction.clone(),
            lat: vehicle.coord.lat,
            lon: vehicle.coord.lon,
        }
    }
}

impl From<&RouteSegment> for SegmentResult {
    fn from(segment: &RouteSegment) -> Self {
        Self {
            route: segment.route_label.clone(),
            from: StopResult::from(segment.from.as_ref()),
            to: StopResult::from(segment.to.as_ref()),
            path: segment.path.clone(),
            color: segment.color.clone(),
            status: segment.status,
            status_color: segment.status.display_color().to_string(),
            upcoming: segment.status.is_upcoming(),
        }
    }
}

impl From<&RouteResult> for ResolvedRoute {
    fn from(result: &RouteResult) -> Self {
        Self {
            route_label: result.route_label().map(str::to_string),
            stop_count: result.stop_count,
            transfer: result.is_transfer(),
            segments: result.segments.iter().map(SegmentResult::from).collect(),
        }
    }
}
