//! HTTP server layer for the gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │    /api/regions/   /api/images/{region}   /images   /thumbs     │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (validation, listing,    │  │ (router config, CORS,       │  │
//! │  │  file serving)           │  │  tracing, static site)      │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    image_file_handler, images_handler, invalid_path_handler, missing_region_handler,
    regions_handler, thumb_file_handler, AppState, ErrorResponse, FilePathParams,
    ImagesQueryParams, RegionCoordinates, RegionsResponse,
};
pub use routes::{
    create_router, RouterConfig, DEFAULT_IMAGES_DIR, DEFAULT_SITE_INDEX, DEFAULT_THUMBS_DIR,
};
