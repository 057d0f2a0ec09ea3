//! Route resolution for the corridor.
//!
//! Given a start stop (or a raw position snapped to the nearest stop) and
//! an end stop, the resolver finds a direct route or a single transfer and
//! returns per-segment road geometry classified relative to the bus.

mod config;
mod nearest;
mod resolve;
mod result;
mod road;
mod status;

pub use config::ResolverConfig;
pub use nearest::nearest_stop;
pub use resolve::Resolver;
pub use result::{RouteResult, RouteSegment};
pub use road::road_path;
pub use status::SegmentStatus;
