//! OSRM-compatible road geometry HTTP client.
//!
//! Provides async point-to-point directions from any server speaking the
//! OSRM `route/v1` protocol. Concurrency is capped with a semaphore.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::Coord;

use super::error::GeometryError;
use super::types::RouteResponse;
use super::{GeometryProvider, TravelMode};

/// Default base URL (public OSRM demo server).
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the geometry client.
#[derive(Debug, Clone)]
pub struct GeometryConfig {
    /// Base URL of the routing server
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeometryConfig {
    /// Create a config pointing at the default server.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (self-hosted OSRM, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Road geometry client for an OSRM server.
#[derive(Debug, Clone)]
pub struct GeometryClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl GeometryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: GeometryConfig) -> Result<Self, GeometryError> {
        if config.max_concurrent == 0 {
            return Err(GeometryError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL for a two-point route request.
    fn route_url(&self, from: Coord, to: Coord, mode: TravelMode) -> String {
        // OSRM wants lon,lat order.
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}",
            self.base_url,
            mode.osrm_profile(),
            from.lon,
            from.lat,
            to.lon,
            to.lat
        )
    }
}

impl GeometryProvider for GeometryClient {
    async fn directions(
        &self,
        from: Coord,
        to: Coord,
        mode: TravelMode,
    ) -> Result<Vec<Coord>, GeometryError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeometryError::NotConfigured("semaphore closed".to_string()))?;

        let url = self.route_url(from, to, mode);
        trace!(%url, "requesting road geometry");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeometryError::RateLimited);
        }

        let body = response.text().await?;

        // OSRM reports NoRoute with a 400 and a JSON body.
        let parsed: Result<RouteResponse, _> = serde_json::from_str(&body);
        if !status.is_success() {
            return match parsed {
                Ok(resp) if resp.code == "NoRoute" => Err(GeometryError::NoRoute),
                _ => Err(GeometryError::ApiError {
                    status: status.as_u16(),
                    message: body.chars().take(500).collect(),
                }),
            };
        }

        let resp = parsed.map_err(|e| GeometryError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        resp.first_path().ok_or(GeometryError::NoRoute)
    }
}
