//! Web layer for the corridor route advisor.
//!
//! Provides JSON endpoints for browsing stops, routes and buses and for
//! resolving a journey between two stops.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, SharedGeometry};
