use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crowding_server::crowding::{CrowdingCacheConfig, CrowdingService};
use crowding_server::history::RouteHistoryStore;
use crowding_server::model::{LineGeometry, MixtureConfig};
use crowding_server::pipeline::RenderPipeline;
use crowding_server::render::OverlayCompositor;
use crowding_server::stations::{
    DirectoryCache, DirectoryCacheConfig, DirectoryLoader, StationResolver, StopPointClient,
    StopPointClientConfig,
};
use crowding_server::tfl::{CrowdingClient, CrowdingClientConfig, RateLimiter};
use crowding_server::web::{AppState, create_router};

/// Minimum spacing between live TfL API calls.
const MIN_API_INTERVAL: Duration = Duration::from_millis(100);

/// Read the TfL application key: `TFL_APP_KEY`, or the conventional
/// secrets file, or nothing (the API tolerates keyless requests at a
/// lower rate limit).
fn app_key() -> Option<String> {
    if let Ok(key) = std::env::var("TFL_APP_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Some(key);
        }
    }
    std::fs::read_to_string("/run/secrets/tfl_app_key")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var).map_or_else(|_| PathBuf::from(default), PathBuf::from)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowding_server=info,tower_http=info".into()),
        )
        .init();

    let app_key = app_key();
    if app_key.is_none() {
        tracing::warn!("no TfL app key configured; live crowding calls may be throttled");
    }

    let data_dir = env_path("CROWDING_DATA_DIR", "data");
    let static_dir = env_path("CROWDING_STATIC_DIR", "static");

    // Station directory: snapshot file if present, else the remote
    // listing behind a daily disk cache.
    let snapshot = data_dir.join("stations_naptan.json");
    let snapshot = snapshot.exists().then_some(snapshot);
    let stop_point_client =
        match StopPointClient::new(StopPointClientConfig::new(app_key.clone())) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "failed to create station listing client");
                std::process::exit(1);
            }
        };
    let directory_cache = DirectoryCache::new(DirectoryCacheConfig::new(
        data_dir.join("stations_cache.json"),
    ));
    let loader = DirectoryLoader::new(snapshot, directory_cache, stop_point_client);
    let directory = match loader.load().await {
        Ok(directory) => Arc::new(directory),
        Err(e) => {
            tracing::error!(error = %e, "failed to load station directory");
            std::process::exit(1);
        }
    };
    tracing::info!(stations = directory.len(), "station directory ready");

    let resolver = Arc::new(StationResolver::new(Arc::clone(&directory)));

    let crowding_client = match CrowdingClient::new(CrowdingClientConfig::new(app_key)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create crowding client");
            std::process::exit(1);
        }
    };
    let crowding = Arc::new(CrowdingService::new(
        crowding_client,
        RateLimiter::new(MIN_API_INTERVAL),
        CrowdingCacheConfig::default(),
    ));

    let history = RouteHistoryStore::new(data_dir.join("history"));

    let geometry = match LineGeometry::load(data_dir.join("line_geometry.json")) {
        Ok(geometry) => Arc::new(geometry),
        Err(e) => {
            tracing::error!(error = %e, "failed to load line geometry");
            std::process::exit(1);
        }
    };

    let compositor = match OverlayCompositor::new(
        data_dir.join("train_overlay.png"),
        geometry.theme_color(),
        &static_dir,
    ) {
        Ok(compositor) => compositor,
        Err(e) => {
            tracing::error!(error = %e, "failed to set up the overlay compositor");
            std::process::exit(1);
        }
    };

    let pipeline = RenderPipeline::new(
        resolver,
        crowding,
        history,
        geometry,
        compositor,
        MixtureConfig::default(),
    );

    let state = AppState::new(pipeline, directory);
    let app = create_router(state, &static_dir.to_string_lossy());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!(%addr, "platform crowding server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
