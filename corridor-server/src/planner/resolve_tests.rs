//! Unit tests for route resolution.

use super::*;
use crate::domain::{RouteId, StopId, Vehicle, VehicleId};
use crate::geometry::{GeometryError, TravelMode};
use crate::registry::gurugram_222c;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Stops laid out northwards, 0.01° apart, in the order given.
fn stops(ids: &[&str]) -> Vec<Arc<Stop>> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            Arc::new(Stop::new(
                StopId::new(*id),
                id.to_uppercase(),
                Coord::new(28.0 + i as f64 * 0.01, 77.0),
            ))
        })
        .collect()
}

fn pick(all: &[Arc<Stop>], ids: &[&str]) -> Vec<Arc<Stop>> {
    ids.iter()
        .map(|id| {
            all.iter()
                .find(|s| s.id().as_str() == *id)
                .cloned()
                .unwrap()
        })
        .collect()
}

fn route(label: &str, color: &str, stops: Vec<Arc<Stop>>) -> Route {
    Route::new(RouteId::new(label.to_lowercase()), label, stops, color).unwrap()
}

fn bus(id: &str, label: &str, at: &Stop) -> Vehicle {
    Vehicle::new(VehicleId::new(id), label, at.coord(), "UP")
}

fn get(reg: &Registry, id: &str) -> Arc<Stop> {
    Arc::clone(reg.stop(&StopId::new(id)).unwrap())
}

fn midpoint(a: Coord, b: Coord) -> Coord {
    Coord::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0)
}

/// Slower for stops further south, so early segments finish last.
fn south_is_slow(from: Coord) -> Duration {
    Duration::from_millis(((29.0 - from.lat) * 1000.0) as u64)
}

/// Mock geometry provider returning a three-point path.
#[derive(Default)]
struct MockProvider {
    fail: bool,
    delay: Option<fn(Coord) -> Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl MockProvider {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn delayed(delay: fn(Coord) -> Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl GeometryProvider for MockProvider {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        _mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay(from)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail {
            return Err(GeometryError::NoRoute);
        }
        Ok(vec![from, midpoint(from, to), to])
    }
}

/// Provider whose calls only complete once two are waiting at once.
struct RendezvousProvider {
    barrier: tokio::sync::Barrier,
}

impl GeometryProvider for RendezvousProvider {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        _mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        self.barrier.wait().await;
        Ok(vec![from, midpoint(from, to), to])
    }
}

/// One route A -> B -> C -> D with a bus parked at B.
fn abcd() -> Registry {
    let all = stops(&["a", "b", "c", "d"]);
    let r = route("R UP", "blue", all.clone());
    let vehicles = vec![bus("v1", "R UP", &all[1])];
    Registry::new(all, vec![r], vehicles)
}

/// X: a -> b -> t, Y: t -> y -> z.
fn transfer_network() -> Registry {
    let all = stops(&["a", "b", "t", "y", "z"]);
    let x = route("X", "green", pick(&all, &["a", "b", "t"]));
    let y = route("Y", "purple", pick(&all, &["t", "y", "z"]));
    Registry::new(all, vec![x, y], vec![])
}

#[tokio::test]
async fn bus_behind_rider_classifies_segments() {
    let reg = abcd();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "c"), &get(&reg, "d"))
        .await
        .unwrap();

    let statuses: Vec<_> = result.segments.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        [
            SegmentStatus::Passed,
            SegmentStatus::Approaching,
            SegmentStatus::Journey,
        ]
    );
    assert_eq!(result.stop_count, 1);
    assert_eq!(result.route_label(), Some("R UP"));
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn nearest_bus_behind_start_wins() {
    let ids: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let all = stops(&id_refs);
    let r = route("L", "blue", all.clone());
    let vehicles = vec![
        bus("v2", "L", &all[2]),
        bus("v5", "L", &all[5]),
        bus("v9", "L", &all[9]),
    ];
    let reg = Registry::new(all, vec![r], vehicles);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "s7"), &get(&reg, "s10"))
        .await
        .unwrap();

    assert_eq!(result.segments.len(), 11);
    assert_eq!(result.segments[4].status, SegmentStatus::Passed);
    assert_eq!(result.segments[5].status, SegmentStatus::Approaching);
    assert_eq!(result.segments[6].status, SegmentStatus::Approaching);
    assert_eq!(result.segments[7].status, SegmentStatus::Journey);
    assert_eq!(result.segments[10].status, SegmentStatus::Remaining);
    assert_eq!(result.stop_count, 3);
}

#[tokio::test]
async fn buses_on_other_routes_or_between_stops_are_ignored() {
    let all = stops(&["a", "b", "c", "d"]);
    let r = route("R UP", "blue", all.clone());
    let vehicles = vec![
        bus("elsewhere", "Q UP", &all[2]),
        Vehicle::new(
            VehicleId::new("between"),
            "R UP",
            midpoint(all[1].coord(), all[2].coord()),
            "UP",
        ),
    ];
    let reg = Registry::new(all, vec![r], vehicles);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "c"), &get(&reg, "d"))
        .await
        .unwrap();

    assert_eq!(result.segments[0].status, SegmentStatus::Approaching);
    assert_eq!(result.segments[1].status, SegmentStatus::Approaching);
}

#[tokio::test]
async fn reversed_query_on_one_way_route_has_no_result() {
    let reg = abcd();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver.resolve(&get(&reg, "d"), &get(&reg, "b")).await;

    assert!(result.is_none());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn reversed_query_uses_reverse_route() {
    let all = stops(&["a", "b", "c", "d"]);
    let up = route("R UP", "blue", all.clone());
    let down = up.reversed(RouteId::new("r-down"), "R DOWN", "red");
    let reg = Registry::new(all, vec![up, down], vec![]);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "d"), &get(&reg, "b"))
        .await
        .unwrap();

    assert_eq!(result.route_label(), Some("R DOWN"));
    assert_eq!(result.stop_count, 2);
    assert!(result.segments.iter().all(|s| s.color == "red"));
    assert_eq!(result.segments[0].from.id().as_str(), "d");
}

#[tokio::test]
async fn disjoint_routes_have_no_result() {
    let all = stops(&["a", "b", "c", "d"]);
    let x = route("X", "blue", pick(&all, &["a", "b"]));
    let y = route("Y", "red", pick(&all, &["c", "d"]));
    let reg = Registry::new(all, vec![x, y], vec![]);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    assert!(resolver
        .resolve(&get(&reg, "a"), &get(&reg, "d"))
        .await
        .is_none());
}

#[tokio::test]
async fn same_stop_has_no_result() {
    let reg = abcd();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let b = get(&reg, "b");
    assert!(resolver.resolve(&b, &b).await.is_none());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn transfer_builds_two_legs() {
    let reg = transfer_network();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "z"))
        .await
        .unwrap();

    assert_eq!(result.segments.len(), 2);
    assert_eq!(result.stop_count, 0);
    assert!(result.is_transfer());

    let (first, second) = (&result.segments[0], &result.segments[1]);
    assert_eq!(first.route_label, "X");
    assert_eq!(first.color, "green");
    assert_eq!(first.from.id().as_str(), "a");
    assert_eq!(first.to.id().as_str(), "t");
    assert_eq!(second.route_label, "Y");
    assert_eq!(second.color, "purple");
    assert_eq!(second.from.id().as_str(), "t");
    assert_eq!(second.to.id().as_str(), "z");
    assert!(result
        .segments
        .iter()
        .all(|s| s.status == SegmentStatus::Journey));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn transfer_picks_earliest_shared_stop_on_first_route() {
    let all = stops(&["a", "t1", "t2", "z"]);
    let x = route("X", "blue", pick(&all, &["a", "t1", "t2"]));
    let y = route("Y", "red", pick(&all, &["t2", "t1", "z"]));
    let reg = Registry::new(all, vec![x, y], vec![]);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "z"))
        .await
        .unwrap();

    assert_eq!(result.segments[0].to.id().as_str(), "t1");
    assert_eq!(result.segments[1].from.id().as_str(), "t1");
}

#[tokio::test(start_paused = true)]
async fn transfer_legs_keep_order_when_second_finishes_first() {
    let reg = transfer_network();
    let provider = MockProvider::delayed(south_is_slow);
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "z"))
        .await
        .unwrap();

    assert_eq!(result.segments[0].route_label, "X");
    assert_eq!(result.segments[0].path.first(), Some(&get(&reg, "a").coord()));
    assert_eq!(result.segments[1].route_label, "Y");
    assert_eq!(result.segments[1].path.last(), Some(&get(&reg, "z").coord()));
    assert_eq!(provider.peak(), 2);
}

#[tokio::test(start_paused = true)]
async fn transfer_legs_are_fetched_concurrently() {
    let reg = transfer_network();
    let provider = RendezvousProvider {
        barrier: tokio::sync::Barrier::new(2),
    };
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "z"))
        .await
        .unwrap();

    // A sequential fetch would time out at the barrier and fall back.
    assert!(result.segments.iter().all(|s| s.path.len() == 3));
}

#[tokio::test(start_paused = true)]
async fn direct_paths_keep_segment_order() {
    let all = stops(&["a", "b", "c", "d", "e", "f"]);
    let r = route("R", "blue", all.clone());
    let reg = Registry::new(all, vec![r], vec![]);
    let provider = MockProvider::delayed(south_is_slow);
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "b"), &get(&reg, "e"))
        .await
        .unwrap();

    for segment in &result.segments {
        assert_eq!(segment.path.first(), Some(&segment.from.coord()));
        assert_eq!(segment.path.last(), Some(&segment.to.coord()));
    }
}

#[tokio::test(start_paused = true)]
async fn direct_fetches_are_batched() {
    let all = stops(&["a", "b", "c", "d", "e", "f"]);
    let r = route("R", "blue", all.clone());
    let reg = Registry::new(all, vec![r], vec![]);
    let provider = MockProvider::delayed(|_| Duration::from_millis(10));
    let config = ResolverConfig {
        batch_size: 2,
        ..ResolverConfig::default()
    };
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "f"))
        .await
        .unwrap();

    assert_eq!(result.segments.len(), 5);
    assert_eq!(provider.calls(), 5);
    assert_eq!(provider.peak(), 2);
}

#[tokio::test]
async fn close_stops_skip_provider() {
    let all: Vec<_> = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, id)| {
            Arc::new(Stop::new(
                StopId::new(*id),
                *id,
                Coord::new(28.0 + i as f64 * 0.0001, 77.0),
            ))
        })
        .collect();
    let r = route("R", "blue", all.clone());
    let reg = Registry::new(all, vec![r], vec![]);
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "c"))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 0);
    assert!(result.segments.iter().all(|s| s.path.len() == 2));
}

#[tokio::test]
async fn provider_failure_still_resolves() {
    let reg = abcd();
    let provider = MockProvider::failing();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(&get(&reg, "a"), &get(&reg, "d"))
        .await
        .unwrap();

    assert_eq!(result.stop_count, 3);
    for segment in &result.segments {
        assert_eq!(segment.path, vec![segment.from.coord(), segment.to.coord()]);
    }
}

#[tokio::test]
async fn empty_registry_resolves_nothing() {
    let reg = Registry::empty();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let stray = stops(&["a", "b"]);
    assert!(resolver.nearest_stop(Coord::new(28.0, 77.0)).is_none());
    assert!(resolver.resolve(&stray[0], &stray[1]).await.is_none());
    assert!(resolver
        .resolve_from_position(Coord::new(28.0, 77.0), &stray[1])
        .await
        .is_none());
}

#[tokio::test]
async fn resolve_from_position_snaps_to_nearest_stop() {
    let reg = abcd();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    // Just north of B.
    let position = Coord::new(28.012, 77.0003);
    assert_eq!(resolver.nearest_stop(position).unwrap().id().as_str(), "b");

    let result = resolver
        .resolve_from_position(position, &get(&reg, "d"))
        .await
        .unwrap();

    assert_eq!(result.stop_count, 2);
    assert_eq!(result.journey_segments().count(), 2);
}

#[tokio::test]
async fn corridor_up_journey() {
    let reg = gurugram_222c().unwrap();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(
            &get(&reg, "park-view-residency"),
            &get(&reg, "ram-mandir"),
        )
        .await
        .unwrap();

    assert_eq!(result.route_label(), Some("222C UP"));
    assert_eq!(result.stop_count, 7);
    assert_eq!(result.segments.len(), 16);

    // bus-2 waits at Ashok Vihar Phase III Extension, one stop behind.
    let count = |want| result.segments.iter().filter(|s| s.status == want).count();
    assert_eq!(count(SegmentStatus::Passed), 8);
    assert_eq!(count(SegmentStatus::Approaching), 1);
    assert_eq!(count(SegmentStatus::Journey), 7);
    assert_eq!(count(SegmentStatus::Remaining), 0);
}

#[tokio::test]
async fn corridor_down_journey() {
    let reg = gurugram_222c().unwrap();
    let provider = MockProvider::default();
    let config = ResolverConfig::default();
    let resolver = Resolver::new(&reg, &provider, &config);

    let result = resolver
        .resolve(
            &get(&reg, "ram-mandir"),
            &get(&reg, "park-view-residency"),
        )
        .await
        .unwrap();

    assert_eq!(result.route_label(), Some("222C DOWN"));
    assert_eq!(result.stop_count, 7);
    assert!(result.segments.iter().all(|s| s.color == "red"));
    // No DOWN bus sits at or before the first stop.
    assert_eq!(result.segments[0].status, SegmentStatus::Journey);
    assert_eq!(result.journey_segments().count(), 7);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    /// (route length, start, end) with start < end < len.
    fn span() -> impl Strategy<Value = (usize, usize, usize)> {
        (2usize..20)
            .prop_flat_map(|len| (Just(len), 1..len))
            .prop_flat_map(|(len, end)| (Just(len), 0..end, Just(end)))
    }

    proptest! {
        /// Direct results cover the whole route and ride exactly end - start segments.
        #[test]
        fn direct_result_shape((len, start, end) in span()) {
            let ids: Vec<String> = (0..len).map(|i| format!("s{i}")).collect();
            let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let all = stops(&id_refs);
            let r = route("P", "blue", all.clone());
            let reg = Registry::new(all, vec![r], vec![]);
            let provider = MockProvider::default();
            let config = ResolverConfig::default();
            let resolver = Resolver::new(&reg, &provider, &config);

            let from = get(&reg, &ids[start]);
            let to = get(&reg, &ids[end]);
            let result = runtime().block_on(resolver.resolve(&from, &to)).unwrap();

            prop_assert_eq!(result.route_label(), Some("P"));
            prop_assert_eq!(result.segments.len(), len - 1);
            prop_assert_eq!(result.stop_count, end - start);
            prop_assert_eq!(result.journey_segments().count(), end - start);
        }
    }
}
