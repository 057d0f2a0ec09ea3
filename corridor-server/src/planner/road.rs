//! Road path adapter around a geometry provider.

use tracing::{trace, warn};

use crate::domain::Coord;
use crate::geometry::{GeometryError, GeometryProvider};

use super::config::ResolverConfig;

/// Fetch the road path between two points, never failing.
///
/// - Endpoints closer than `short_circuit_deg` on both axes return
///   `[from, to]` without calling the provider.
/// - Provider errors, unusable polylines and calls exceeding the
///   configured timeout also return `[from, to]`.
pub async fn road_path<P: GeometryProvider>(
    provider: &P,
    from: Coord,
    to: Coord,
    config: &ResolverConfig,
) -> Vec<Coord> {
    if from.within(&to, config.short_circuit_deg) {
        trace!(%from, %to, "endpoints too close, skipping provider");
        return vec![from, to];
    }

    let call = provider.directions(from, to, config.travel_mode);
    let result = tokio::time::timeout(config.geometry_timeout(), call)
        .await
        .map_err(|_| GeometryError::Timeout)
        .and_then(|inner| inner);

    match result {
        Ok(path) if path.len() >= 2 => path,
        Ok(path) => {
            warn!(%from, %to, points = path.len(), "degenerate road path, using straight line");
            vec![from, to]
        }
        Err(e) => {
            warn!(%from, %to, error = %e, "road geometry unavailable, using straight line");
            vec![from, to]
        }
    }
}
