//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{Coord, Stop, StopId};
use crate::planner::Resolver;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stops", get(list_stops))
        .route("/stops/search", get(search_stops))
        .route("/stops/nearest", get(nearest_stop))
        .route("/routes", get(list_routes))
        .route("/vehicles", get(list_vehicles))
        .route("/route/resolve", post(resolve_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stops in seed order.
async fn list_stops(State(state): State<AppState>) -> Json<StopListResponse> {
    let stops = state
        .registry
        .stops()
        .iter()
        .map(|s| StopResult::from(s.as_ref()))
        .collect();

    Json(StopListResponse { stops })
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopListResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let stops = state
        .registry
        .search_stops(&req.q, limit)
        .iter()
        .map(|s| StopResult::from(s.as_ref()))
        .collect();

    Json(StopListResponse { stops })
}

/// Stop closest to a position.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearestStopRequest>,
) -> Result<Json<StopResult>, AppError> {
    let position = finite_position(Coord::new(req.lat, req.lon))?;
    let resolver = Resolver::new(&state.registry, state.geometry.as_ref(), &state.config);

    resolver
        .nearest_stop(position)
        .map(|s| Json(StopResult::from(s.as_ref())))
        .ok_or_else(|| AppError::NotFound {
            message: "No stops loaded".to_string(),
        })
}

/// All routes in seed order.
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let routes = state.registry.routes().iter().map(RouteInfo::from).collect();
    Json(RouteListResponse { routes })
}

/// Buses, optionally only those on one route label.
async fn list_vehicles(
    State(state): State<AppState>,
    Query(req): Query<VehicleQuery>,
) -> Json<VehicleListResponse> {
    let vehicles = match req.route.as_deref() {
        Some(label) => state
            .registry
            .vehicles_on(label)
            .map(VehicleResult::from)
            .collect(),
        None => state
            .registry
            .vehicles()
            .iter()
            .map(VehicleResult::from)
            .collect(),
    };

    Json(VehicleListResponse { vehicles })
}

/// Resolve a journey to `end` from a stop or a raw position.
async fn resolve_route(
    State(state): State<AppState>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    let end = lookup_stop(&state, &req.end)?;
    let resolver = Resolver::new(&state.registry, state.geometry.as_ref(), &state.config);

    let result = match (req.start.as_deref(), req.position) {
        (Some(start), None) => {
            let start = lookup_stop(&state, start)?;
            resolver.resolve(&start, &end).await
        }
        (None, Some(position)) => {
            let position = finite_position(position)?;
            resolver.resolve_from_position(position, &end).await
        }
        _ => {
            return Err(AppError::BadRequest {
                message: "Exactly one of start or position is required".to_string(),
            });
        }
    };

    // Buses on the resolved route; the map shows no buses without a route.
    let vehicles: Vec<VehicleResult> = result
        .as_ref()
        .and_then(|r| r.route_label())
        .map(|label| {
            state
                .registry
                .vehicles_on(label)
                .map(VehicleResult::from)
                .collect()
        })
        .unwrap_or_default();

    debug!(
        end = %end.id(),
        found = result.is_some(),
        vehicles = vehicles.len(),
        "resolve request complete"
    );

    Ok(Json(ResolveResponse {
        route: result.as_ref().map(ResolvedRoute::from),
        vehicles,
    }))
}

fn finite_position(position: Coord) -> Result<Coord, AppError> {
    if position.is_finite() {
        Ok(position)
    } else {
        Err(AppError::BadRequest {
            message: format!("Invalid position: {}, {}", position.lat, position.lon),
        })
    }
}

fn lookup_stop(state: &AppState, id: &str) -> Result<Arc<Stop>, AppError> {
    state
        .registry
        .stop(&StopId::new(id))
        .cloned()
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown stop: {id}"),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
