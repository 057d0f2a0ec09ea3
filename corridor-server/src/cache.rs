//! Caching layer for road geometry.
//!
//! Stop coordinates are static, so the same stop-to-stop path is requested
//! on every query that covers it. Successful polylines are cached keyed by
//! endpoints quantised to 1e-6 degrees plus travel mode. Failures are not
//! cached, so a transient provider outage heals on the next query.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::Coord;
use crate::geometry::{GeometryError, GeometryProvider, TravelMode};

/// Cache key: quantised (from.lat, from.lon, to.lat, to.lon) and mode.
type PathKey = (i64, i64, i64, i64, TravelMode);

/// Cached polyline entry.
type PathEntry = Arc<Vec<Coord>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

fn quantise(deg: f64) -> i64 {
    (deg * 1e6).round() as i64
}

fn path_key(from: Coord, to: Coord, mode: TravelMode) -> PathKey {
    (
        quantise(from.lat),
        quantise(from.lon),
        quantise(to.lat),
        quantise(to.lon),
        mode,
    )
}

/// Geometry provider with caching.
///
/// Wraps any `GeometryProvider` and caches successful responses.
pub struct CachedGeometryClient<P> {
    inner: P,
    paths: MokaCache<PathKey, PathEntry>,
}

impl<P: GeometryProvider> CachedGeometryClient<P> {
    /// Create a new cached client.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, paths }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.paths.invalidate_all();
    }
}

impl<P: GeometryProvider> GeometryProvider for CachedGeometryClient<P> {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        let key = path_key(from, to, mode);

        if let Some(cached) = self.paths.get(&key).await {
            trace!(%from, %to, "geometry cache hit");
            return Ok(cached.as_ref().clone());
        }

        let path = self.inner.directions(from, to, mode).await?;
        self.paths.insert(key, Arc::new(path.clone())).await;

        Ok(path)
    }
}
