//! Region Gallery - image galleries scoped by allow-listed regions.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use region_gallery::{
    config::Config,
    region::{RegionStore, SqliteRegionStore},
    server::create_router,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Region Gallery v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Images: {}", config.images_dir.display());
    info!("  Thumbnails: {}", config.thumbs_dir.display());
    info!("  Site index: {}", config.site_index.display());
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    for (name, dir) in [("images", &config.images_dir), ("thumbs", &config.thumbs_dir)] {
        if !dir.is_dir() {
            warn!("  The {} directory '{}' does not exist", name, dir.display());
        }
    }

    // Open the store once; it lives for the rest of the process
    info!("");
    info!("Opening region store...");
    let store = match SqliteRegionStore::open(&config.database_url) {
        Ok(store) => store,
        Err(e) => {
            error!("  {}", e);
            return ExitCode::FAILURE;
        }
    };

    match store.list_regions().await {
        Ok(regions) => {
            info!("  Connected successfully");
            info!("  Found {} region(s)", regions.len());
        }
        Err(e) => {
            error!("  Failed to query regions: {}", e);
            error!("");
            error!("  Please check:");
            error!("    - DATABASE_URL points at an existing SQLite database");
            error!("    - The database has a 'region' table with (name, lat, long) columns");
            return ExitCode::FAILURE;
        }
    }

    let router = create_router(store, config.router_config());
    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("    curl http://{}/api/regions/", addr);
    info!("    curl http://{}/api/images/<region>?offset=0&limit=30", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "region_gallery=debug,tower_http=debug"
    } else {
        "region_gallery=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
