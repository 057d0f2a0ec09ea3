//! Route resolution between two stops.
//!
//! Resolution first looks for a single route that travels from the start
//! stop to the end stop. Failing that, it looks for a pair of routes that
//! share a stop and builds a two-leg transfer. Road geometry is fetched per
//! segment through the geometry provider.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{Coord, Route, Stop};
use crate::geometry::GeometryProvider;
use crate::registry::Registry;

use super::config::ResolverConfig;
use super::nearest::nearest_stop;
use super::result::{RouteResult, RouteSegment};
use super::road::road_path;
use super::status::SegmentStatus;

/// A route that travels from the start stop to the end stop.
#[derive(Debug, Clone, Copy)]
struct DirectMatch<'r> {
    route: &'r Route,
    start_idx: usize,
    end_idx: usize,
}

/// Two routes joined at a shared stop.
#[derive(Debug, Clone, Copy)]
struct TransferMatch<'r> {
    first: &'r Route,
    second: &'r Route,
    transfer: &'r Arc<Stop>,
}

/// Route resolver over a static registry.
pub struct Resolver<'a, P: GeometryProvider> {
    registry: &'a Registry,
    provider: &'a P,
    config: &'a ResolverConfig,
}

impl<'a, P: GeometryProvider> Resolver<'a, P> {
    /// Create a new resolver.
    pub fn new(registry: &'a Registry, provider: &'a P, config: &'a ResolverConfig) -> Self {
        Self {
            registry,
            provider,
            config,
        }
    }

    /// The stop closest to `position`, if the registry has any.
    pub fn nearest_stop(&self, position: Coord) -> Option<&'a Arc<Stop>> {
        nearest_stop(position, self.registry.stops())
    }

    /// Resolve from a raw position: snap to the nearest stop, then resolve.
    pub async fn resolve_from_position(&self, position: Coord, end: &Stop) -> Option<RouteResult> {
        let start = self.nearest_stop(position)?;
        debug!(%position, start = %start.id(), "snapped position to nearest stop");
        self.resolve(start, end).await
    }

    /// Resolve a journey from `start` to `end`.
    ///
    /// Returns `None` when no direct route or single transfer connects
    /// the stops, or when they are the same stop. Geometry failures never
    /// cause `None`; they degrade to straight segments.
    pub async fn resolve(&self, start: &Stop, end: &Stop) -> Option<RouteResult> {
        if start == end {
            debug!(stop = %start.id(), "start and end are the same stop");
            return None;
        }

        if let Some(direct) = self.find_direct(start, end) {
            debug!(
                route = %direct.route.label(),
                start_idx = direct.start_idx,
                end_idx = direct.end_idx,
                "direct route found"
            );
            return Some(self.build_direct(direct).await);
        }

        if let Some(transfer) = self.find_transfer(start, end) {
            debug!(
                first = %transfer.first.label(),
                second = %transfer.second.label(),
                transfer = %transfer.transfer.id(),
                "transfer route found"
            );
            return Some(self.build_transfer(start, end, transfer).await);
        }

        debug!(start = %start.id(), end = %end.id(), "no route");
        None
    }

    /// First route, in registry order, that travels from `start` to `end`.
    ///
    /// Routes that contain both stops in the wrong order are skipped.
    fn find_direct(&self, start: &Stop, end: &Stop) -> Option<DirectMatch<'a>> {
        self.registry.routes().iter().find_map(|route| {
            route
                .directional_span(start, end)
                .map(|(start_idx, end_idx)| DirectMatch {
                    route,
                    start_idx,
                    end_idx,
                })
        })
    }

    /// First (route containing `start`, route containing `end`) pair that
    /// shares a stop.
    ///
    /// The transfer stop is the shared stop with the lowest index on the
    /// first route. A route is never paired with itself.
    fn find_transfer(&self, start: &Stop, end: &Stop) -> Option<TransferMatch<'a>> {
        let routes = self.registry.routes();

        for first in routes.iter().filter(|r| r.contains(start)) {
            for second in routes.iter().filter(|r| r.contains(end)) {
                if first.id() == second.id() {
                    continue;
                }

                let shared: HashSet<&Stop> =
                    second.stops().iter().map(|s| Arc::as_ref(s)).collect();
                let transfer = first.stops().iter().find(|s| shared.contains(Arc::as_ref(s)));
                if let Some(transfer) = transfer {
                    return Some(TransferMatch {
                        first,
                        second,
                        transfer,
                    });
                }
            }
        }

        None
    }

    /// Route index of the bus closest behind (or at) the rider.
    ///
    /// Considers buses on `route` located at a stop with index at most
    /// `start_idx`, and picks the highest such index. Defaults to 0 when
    /// no bus qualifies.
    fn operating_vehicle_index(&self, route: &Route, start_idx: usize) -> usize {
        let tolerance = self.config.vehicle_tolerance_deg;
        self.registry
            .vehicles()
            .iter()
            .filter(|v| v.operates(route))
            .flat_map(|v| v.stop_indices(route, tolerance))
            .filter(|&idx| idx <= start_idx)
            .max()
            .unwrap_or(0)
    }

    /// Build a result covering every segment of the route, classified
    /// relative to the bus and the rider.
    async fn build_direct(&self, m: DirectMatch<'a>) -> RouteResult {
        let route = m.route;
        let vehicle_idx = self.operating_vehicle_index(route, m.start_idx);
        debug!(route = %route.label(), vehicle_idx, "operating vehicle");

        let pairs: Vec<(&Arc<Stop>, &Arc<Stop>)> =
            route.stops().windows(2).map(|w| (&w[0], &w[1])).collect();

        // join_all keeps input order, so paths line up with pairs.
        let mut paths = Vec::with_capacity(pairs.len());
        for batch in pairs.chunks(self.config.batch_size.max(1)) {
            let fetches = batch
                .iter()
                .map(|(from, to)| road_path(self.provider, from.coord(), to.coord(), self.config));
            paths.extend(join_all(fetches).await);
        }

        let segments = pairs
            .into_iter()
            .zip(paths)
            .enumerate()
            .map(|(idx, ((from, to), path))| RouteSegment {
                route_label: route.label().to_string(),
                from: Arc::clone(from),
                to: Arc::clone(to),
                path,
                color: route.color().to_string(),
                status: SegmentStatus::classify(idx, vehicle_idx, m.start_idx, m.end_idx),
            })
            .collect();

        RouteResult {
            stop_count: m.end_idx - m.start_idx,
            segments,
        }
    }

    /// Build a two-leg result, fetching both legs concurrently.
    async fn build_transfer(&self, start: &Stop, end: &Stop, m: TransferMatch<'a>) -> RouteResult {
        let transfer = m.transfer;

        // Both fetches are polled together; neither waits for the other.
        let (first_path, second_path) = tokio::join!(
            road_path(self.provider, start.coord(), transfer.coord(), self.config),
            road_path(self.provider, transfer.coord(), end.coord(), self.config),
        );

        let first = RouteSegment {
            route_label: m.first.label().to_string(),
            from: self.shared_stop(start),
            to: Arc::clone(transfer),
            path: first_path,
            color: m.first.color().to_string(),
            status: SegmentStatus::Journey,
        };
        let second = RouteSegment {
            route_label: m.second.label().to_string(),
            from: Arc::clone(transfer),
            to: self.shared_stop(end),
            path: second_path,
            color: m.second.color().to_string(),
            status: SegmentStatus::Journey,
        };

        // TODO: count stops per leg once transfers check travel direction.
        RouteResult {
            stop_count: 0,
            segments: vec![first, second],
        }
    }

    /// The registry's shared handle for `stop`, or a fresh one if the
    /// caller passed a stop the registry does not know.
    fn shared_stop(&self, stop: &Stop) -> Arc<Stop> {
        self.registry
            .stop(stop.id())
            .cloned()
            .unwrap_or_else(|| Arc::new(stop.clone()))
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
