//! Domain types for the corridor route advisor.
//!
//! This module contains the static entities of a bus corridor: stops,
//! directional routes and parked vehicles. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod coord;
mod error;
mod route;
mod stop;
mod vehicle;

pub use coord::{AT_STOP_TOLERANCE_DEG, Coord};
pub use error::DomainError;
pub use route::{Route, RouteId};
pub use stop::{Stop, StopId};
pub use vehicle::{Vehicle, VehicleId};
