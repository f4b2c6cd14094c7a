//! # Region Gallery
//!
//! An HTTP server for paginated, region-scoped image galleries.
//!
//! Images live on disk as `images/<region>/<file>` with matching thumbnails
//! under `thumbs/<region>/<file>`. A SQLite `region` table is the allow-list:
//! no listing or file is served for a region that is not in it.
//!
//! ## Features
//!
//! - **Region allow-list**: every request is validated against the store, failing closed
//! - **Traversal-safe serving**: region and filename segments containing `..` are rejected
//! - **Paginated listings**: offset/limit pages over a filtered directory listing
//! - **CORS**: API routes answer preflight requests and allow any origin by default
//!
//! ## Architecture
//!
//! - [`region`] - Region store trait, SQLite backend, and allow-list validator
//! - [`gallery`] - Path sanitizing and image directory listing
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use region_gallery::{create_router, RouterConfig, SqliteRegionStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = SqliteRegionStore::open("gallery.db").expect("open store");
//!     let router = create_router(store, RouterConfig::default());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod region;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{GalleryError, StoreError};
pub use gallery::{
    is_image, is_traversal, list_images, list_page, sanitize_filename, sanitize_region, ImagePage,
    PageRequest, IMAGE_EXTENSIONS, MAX_PAGE_SIZE, TRAVERSAL_MARKER,
};
pub use region::{Region, RegionStore, RegionValidator, SqliteRegionStore};
pub use server::{
    create_router, AppState, ErrorResponse, FilePathParams, ImagesQueryParams, RegionCoordinates,
    RegionsResponse, RouterConfig,
};
