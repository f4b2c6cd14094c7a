//! Router configuration for the gallery server.
//!
//! This module defines the HTTP routes and applies middleware for CORS and
//! request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /api/regions/                      - Region coordinates (CORS)
//! /api/images/{region}[/{*rest}]     - Paginated image listing (CORS)
//! /images/{region}/{filename}        - Full-size image file
//! /thumbs/{region}/{filename}        - Thumbnail file
//! /  and anything unmatched          - Static site entry file
//! ```
//!
//! # Example
//!
//! ```ignore
//! use region_gallery::region::SqliteRegionStore;
//! use region_gallery::server::routes::{create_router, RouterConfig};
//!
//! let store = SqliteRegionStore::open("gallery.db")?;
//! let config = RouterConfig::default().with_images_dir("/srv/gallery/images");
//!
//! let router = create_router(store, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use axum::{response::Response, routing::get, Router};
use http::header::{ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE};
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    image_file_handler, images_handler, invalid_path_handler, missing_region_handler,
    regions_handler, thumb_file_handler, AppState,
};
use crate::region::RegionStore;

/// Default root for full-size images.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default root for thumbnails.
pub const DEFAULT_THUMBS_DIR: &str = "thumbs";

/// Default static site entry file.
pub const DEFAULT_SITE_INDEX: &str = "index.html";

/// `Access-Control-Allow-Methods` value sent on preflight responses.
pub const ALLOWED_METHODS: &str = "GET, OPTIONS";

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Root directory for `<region>/<file>` images
    pub images_dir: PathBuf,

    /// Root directory for `<region>/<file>` thumbnails
    pub thumbs_dir: PathBuf,

    /// File served for `/` and unmatched paths
    pub site_index: PathBuf,

    /// Allowed CORS origins on the API routes (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl Default for RouterConfig {
    /// Paths relative to the working directory, any CORS origin, tracing on.
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            thumbs_dir: PathBuf::from(DEFAULT_THUMBS_DIR),
            site_index: PathBuf::from(DEFAULT_SITE_INDEX),
            cors_origins: None,
            enable_tracing: true,
        }
    }
}

impl RouterConfig {
    /// Set the images root directory.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Set the thumbnails root directory.
    pub fn with_thumbs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.thumbs_dir = dir.into();
        self
    }

    /// Set the static site entry file.
    pub fn with_site_index(mut self, path: impl Into<PathBuf>) -> Self {
        self.site_index = path.into();
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// The store is moved into shared state and handed to every handler.
pub fn create_router<S>(store: S, config: RouterConfig) -> Router
where
    S: RegionStore + 'static,
{
    let app_state = AppState::new(store, config.images_dir.clone(), config.thumbs_dir.clone());
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .merge(build_api_router(app_state.clone(), cors))
        .merge(build_file_router(app_state))
        .route_service("/", ServeFile::new(&config.site_index))
        .fallback_service(ServeFile::new(&config.site_index));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// JSON API routes. CORS preflight is answered by the layer itself; its
/// method list is rewritten to the spaced `GET, OPTIONS` form.
fn build_api_router<S>(app_state: AppState<S>, cors: CorsLayer) -> Router
where
    S: RegionStore + 'static,
{
    Router::new()
        .route("/api/regions", get(regions_handler::<S>))
        .route("/api/regions/", get(regions_handler::<S>))
        .route("/api/images/", get(missing_region_handler))
        .route("/api/images/{region}", get(images_handler::<S>))
        .route("/api/images/{region}/", get(images_handler::<S>))
        .route("/api/images/{region}/{*rest}", get(images_handler::<S>))
        .with_state(app_state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            |response: &Response| {
                response
                    .headers()
                    .contains_key(ACCESS_CONTROL_ALLOW_METHODS)
                    .then(|| HeaderValue::from_static(ALLOWED_METHODS))
            },
        ))
}

/// File serving routes. The filename is captured with a wildcard so that
/// traversal attempts reach the handler and are rejected there.
fn build_file_router<S>(app_state: AppState<S>) -> Router
where
    S: RegionStore + 'static,
{
    Router::new()
        .route("/images/", get(invalid_path_handler))
        .route("/images/{region}", get(invalid_path_handler))
        .route("/images/{region}/", get(invalid_path_handler))
        .route("/images/{region}/{*filename}", get(image_file_handler::<S>))
        .route("/thumbs/", get(invalid_path_handler))
        .route("/thumbs/{region}", get(invalid_path_handler))
        .route("/thumbs/{region}/", get(invalid_path_handler))
        .route("/thumbs/{region}/{*filename}", get(thumb_file_handler::<S>))
        .with_state(app_state)
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
