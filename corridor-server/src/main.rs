use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use corridor_server::cache::{CacheConfig, CachedGeometryClient};
use corridor_server::geometry::{
    GeometryBackend, GeometryClient, GeometryConfig, MockGeometryClient,
};
use corridor_server::planner::ResolverConfig;
use corridor_server::registry::{Registry, gurugram_222c};
use corridor_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("corridor_server=info,tower_http=info")),
        )
        .init();

    // Load stops, routes and buses
    let registry = match std::env::var("CORRIDOR_SEED") {
        Ok(path) => Registry::load(&path).expect("Failed to load corridor seed"),
        Err(_) => gurugram_222c().expect("Built-in corridor is invalid"),
    };
    info!(
        stops = registry.stops().len(),
        routes = registry.routes().len(),
        vehicles = registry.vehicles().len(),
        "loaded corridor"
    );

    // Pick the geometry backend: offline fixtures or a live OSRM server
    let backend = match std::env::var("GEOMETRY_FIXTURES") {
        Ok(path) => GeometryBackend::Fixtures(
            MockGeometryClient::new(&path).expect("Failed to load geometry fixtures"),
        ),
        Err(_) => {
            let mut config = GeometryConfig::new();
            match std::env::var("GEOMETRY_BASE_URL") {
                Ok(url) => config = config.with_base_url(url),
                Err(_) => warn!(
                    base_url = %config.base_url,
                    "GEOMETRY_BASE_URL not set, using public OSRM demo server"
                ),
            }
            GeometryBackend::Osrm(
                GeometryClient::new(config).expect("Failed to create geometry client"),
            )
        }
    };
    info!(backend = backend.kind(), "geometry provider ready");

    let geometry = CachedGeometryClient::new(backend, &CacheConfig::default());
    let state = AppState::new(registry, geometry, ResolverConfig::default());
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR is not a socket address");

    info!(%addr, "corridor route advisor listening");
    info!("  GET  /health           - Health check");
    info!("  GET  /stops            - All stops");
    info!("  GET  /stops/search     - Search stops by name");
    info!("  GET  /stops/nearest    - Stop nearest a position");
    info!("  GET  /routes           - Routes and their stops");
    info!("  GET  /vehicles         - Buses, optionally by route");
    info!("  POST /route/resolve    - Resolve a journey");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
