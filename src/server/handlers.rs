//! HTTP request handlers for the gallery API.
//!
//! # Endpoints
//!
//! - `GET /api/regions/` - Map of region name to coordinates
//! - `GET /api/images/{region}` - One page of a region's image listing
//! - `GET /images/{region}/{filename}` - Full-size image file
//! - `GET /thumbs/{region}/{filename}` - Thumbnail file

use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, error, warn};

use crate::error::GalleryError;
use crate::gallery::{list_images, sanitize_filename, sanitize_region, ImagePage, PageRequest};
use crate::region::{RegionStore, RegionValidator};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// The store is passed in explicitly and shared by every handler.
pub struct AppState<S: RegionStore> {
    /// Region store used for the regions listing
    pub store: Arc<S>,

    /// Allow-list gate over the same store
    pub validator: RegionValidator<S>,

    /// Root directory holding `<region>/<file>` images
    pub images_dir: PathBuf,

    /// Root directory holding `<region>/<file>` thumbnails
    pub thumbs_dir: PathBuf,
}

impl<S: RegionStore> AppState<S> {
    /// Create application state over a store and the two file roots.
    pub fn new(store: S, images_dir: impl Into<PathBuf>, thumbs_dir: impl Into<PathBuf>) -> Self {
        let store = Arc::new(store);
        Self {
            validator: RegionValidator::new(Arc::clone(&store)),
            store,
            images_dir: images_dir.into(),
            thumbs_dir: thumbs_dir.into(),
        }
    }

    /// Sanitize a region segment and check it against the allow-list.
    ///
    /// Traversal is rejected before the store is consulted.
    async fn authorize_region(&self, segment: &str) -> Result<String, GalleryError> {
        let region = sanitize_region(segment)?;
        self.ensure_allowed(&region).await?;
        Ok(region)
    }

    async fn ensure_allowed(&self, region: &str) -> Result<(), GalleryError> {
        if self.validator.is_allowed(region).await {
            Ok(())
        } else {
            Err(GalleryError::Forbidden)
        }
    }
}

impl<S: RegionStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            validator: self.validator.clone(),
            images_dir: self.images_dir.clone(),
            thumbs_dir: self.thumbs_dir.clone(),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the image listing endpoint.
///
/// Kept as raw strings so that non-numeric values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ImagesQueryParams {
    /// Number of matching images to skip (default: 0)
    #[serde(default)]
    pub offset: Option<String>,

    /// Page size, 1-30 (default: 30)
    #[serde(default)]
    pub limit: Option<String>,
}

impl ImagesQueryParams {
    /// Resolve the raw values into a clamped page request.
    pub fn page(&self) -> PageRequest {
        PageRequest::from_query(self.offset.as_deref(), self.limit.as_deref())
    }
}

/// Path parameters for listing requests.
///
/// Extracted from: `/api/images/{region}` and `/api/images/{region}/{*rest}`
#[derive(Debug, Deserialize)]
pub struct ListingPathParams {
    /// Region name (case-insensitive)
    pub region: String,

    /// Trailing segments after the region, if any
    #[serde(default)]
    pub rest: Option<String>,
}

/// Path parameters for file requests.
///
/// Extracted from: `/images/{region}/{*filename}` and `/thumbs/{region}/{*filename}`
#[derive(Debug, Deserialize)]
pub struct FilePathParams {
    /// Region name (case-insensitive)
    pub region: String,

    /// Everything after the region segment
    pub filename: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "forbidden", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Coordinates of a single region in the regions listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionCoordinates {
    #[serde(rename = "Lat")]
    pub lat: f32,

    #[serde(rename = "Long")]
    pub long: f32,
}

/// Response from the regions listing endpoint, keyed by region name.
pub type RegionsResponse = BTreeMap<String, RegionCoordinates>;

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert GalleryError to HTTP response.
///
/// Server errors are logged at ERROR, 404s at DEBUG, other client errors at WARN.
/// Store failures never leak their message to the client.
impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            GalleryError::MissingRegion => (
                StatusCode::BAD_REQUEST,
                "missing_region",
                "Missing region".to_string(),
            ),
            GalleryError::InvalidPath => (
                StatusCode::BAD_REQUEST,
                "invalid_path",
                "Invalid path".to_string(),
            ),
            GalleryError::Forbidden => {
                (StatusCode::FORBIDDEN, "forbidden", "Forbidden".to_string())
            }
            GalleryError::RegionNotFound { .. } => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Region not found".to_string(),
            ),
            GalleryError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "Failed to read regions".to_string(),
            ),
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                self
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = error_type,
                status = status.as_u16(),
                "Resource not found: {}",
                self
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        let error_response = ErrorResponse::with_status(error_type, message, status);

        (status, Json(error_response)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle region listing requests.
///
/// # Endpoint
///
/// `GET /api/regions/`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "paris": { "Lat": 48.85, "Long": 2.35 }
/// }
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Store query failed
pub async fn regions_handler<S: RegionStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<RegionsResponse>, GalleryError> {
    let regions = state.store.list_regions().await?;

    let response = regions
        .into_iter()
        .map(|region| {
            (
                region.name,
                RegionCoordinates {
                    lat: region.lat,
                    long: region.long,
                },
            )
        })
        .collect();

    Ok(Json(response))
}

/// Handle image listing requests.
///
/// # Endpoint
///
/// `GET /api/images/{region}?offset={offset}&limit={limit}`
///
/// Segments after the region (`/api/images/{region}/{*rest}`) are ignored.
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "images": ["a.png", "c.jpg"],
///   "has_more": true
/// }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Region not allow-listed or contains `..`
/// - `404 Not Found`: Region directory missing on disk
pub async fn images_handler<S: RegionStore>(
    State(state): State<AppState<S>>,
    Path(params): Path<ListingPathParams>,
    Query(query): Query<ImagesQueryParams>,
) -> Result<Json<ImagePage>, GalleryError> {
    if let Some(rest) = &params.rest {
        debug!(region = %params.region, rest = %rest, "Ignoring trailing listing path");
    }

    let region = state.authorize_region(&params.region).await?;
    let page = query.page();

    let listing = list_images(state.images_dir.join(&region), page)
        .await
        .map_err(|e| {
            debug!(region = %region, error = %e, "Failed to read region directory");
            GalleryError::RegionNotFound {
                region: region.clone(),
            }
        })?;

    Ok(Json(listing))
}

/// Handle listing requests with no region segment.
///
/// `GET /api/images/` always answers `400 Bad Request`.
pub async fn missing_region_handler() -> GalleryError {
    GalleryError::MissingRegion
}

/// Handle file requests that are missing the filename segment.
///
/// `GET /images/{region}` and `GET /thumbs/{region}` answer `400 Bad Request`.
pub async fn invalid_path_handler() -> GalleryError {
    GalleryError::InvalidPath
}

/// Handle full-size image requests.
///
/// # Endpoint
///
/// `GET /images/{region}/{filename}`
///
/// # Errors
///
/// - `403 Forbidden`: Region not allow-listed, or `..` in region or filename
/// - `404 Not Found`: File does not exist
pub async fn image_file_handler<S: RegionStore>(
    State(state): State<AppState<S>>,
    Path(params): Path<FilePathParams>,
    request: Request,
) -> Result<Response, GalleryError> {
    serve_region_file(&state, &state.images_dir, &params, request).await
}

/// Handle thumbnail requests.
///
/// # Endpoint
///
/// `GET /thumbs/{region}/{filename}`
///
/// Same checks as [`image_file_handler`], served from the thumbnails root.
pub async fn thumb_file_handler<S: RegionStore>(
    State(state): State<AppState<S>>,
    Path(params): Path<FilePathParams>,
    request: Request,
) -> Result<Response, GalleryError> {
    serve_region_file(&state, &state.thumbs_dir, &params, request).await
}

/// Validate both segments, then stream `root/<region>/<filename>`.
///
/// Extension is not checked here; only the listing filters by image type.
async fn serve_region_file<S: RegionStore>(
    state: &AppState<S>,
    root: &FsPath,
    params: &FilePathParams,
    request: Request,
) -> Result<Response, GalleryError> {
    let region = sanitize_region(&params.region)?;
    let filename = sanitize_filename(&params.filename)?;
    state.ensure_allowed(&region).await?;

    let path = root.join(&region).join(filename);
    debug!(path = %path.display(), "Serving file");

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});

    Ok(response.map(Body::new))
}

// =============================================================================
// Tests
// =============================================================================
