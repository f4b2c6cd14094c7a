//! Test utilities for integration tests.
//!
//! Provides a temporary gallery layout on disk, an in-memory SQLite region
//! store, and mock stores for counting lookups and simulating failures.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rusqlite::Connection;
use tempfile::TempDir;
use tower::ServiceExt;

use region_gallery::error::StoreError;
use region_gallery::region::{Region, RegionStore, SqliteRegionStore};
use region_gallery::{create_router, RouterConfig};

/// Contents written to the static site entry file.
pub const SITE_INDEX_HTML: &str = "<!doctype html><title>gallery</title>";

// =============================================================================
// Test Gallery
// =============================================================================

/// A temporary gallery: `images/`, `thumbs/`, and `index.html` in a temp dir,
/// plus the region rows to seed into the store.
pub struct TestGallery {
    dir: TempDir,
    regions: Vec<Region>,
}

impl TestGallery {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::create_dir(dir.path().join("thumbs")).unwrap();
        std::fs::write(dir.path().join("index.html"), SITE_INDEX_HTML).unwrap();

        Self {
            dir,
            regions: Vec::new(),
        }
    }

    /// Add a row to the region table.
    pub fn with_region(mut self, name: &str, lat: f32, long: f32) -> Self {
        self.regions.push(Region {
            name: name.to_string(),
            lat,
            long,
        });
        self
    }

    /// Create `images/<region>/` without any files.
    pub fn with_image_dir(self, region: &str) -> Self {
        std::fs::create_dir_all(self.images_dir().join(region)).unwrap();
        self
    }

    /// Write `images/<region>/<file>`.
    pub fn with_image(self, region: &str, file: &str, data: &[u8]) -> Self {
        write_file(&self.images_dir().join(region), file, data);
        self
    }

    /// Write `thumbs/<region>/<file>`.
    pub fn with_thumb(self, region: &str, file: &str, data: &[u8]) -> Self {
        write_file(&self.thumbs_dir().join(region), file, data);
        self
    }

    /// Write a file relative to the gallery root (outside images/thumbs).
    pub fn with_root_file(self, path: &str, data: &[u8]) -> Self {
        let full = self.root().join(path);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(full, data).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root().join("images")
    }

    pub fn thumbs_dir(&self) -> PathBuf {
        self.root().join("thumbs")
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::default()
            .with_images_dir(self.images_dir())
            .with_thumbs_dir(self.thumbs_dir())
            .with_site_index(self.root().join("index.html"))
            .with_tracing(false)
    }

    /// Build an in-memory SQLite store seeded with the configured regions.
    pub fn sqlite_store(&self) -> SqliteRegionStore {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE region (name TEXT PRIMARY KEY, lat REAL, long REAL);")
            .unwrap();
        for region in &self.regions {
            conn.execute(
                "INSERT INTO region (name, lat, long) VALUES (?1, ?2, ?3)",
                rusqlite::params![region.name, region.lat as f64, region.long as f64],
            )
            .unwrap();
        }
        SqliteRegionStore::from_connection(conn)
    }

    /// Router over the seeded SQLite store.
    pub fn router(&self) -> Router {
        create_router(self.sqlite_store(), self.router_config())
    }

    /// Router over an arbitrary store.
    pub fn router_with_store<S: RegionStore + 'static>(&self, store: S) -> Router {
        create_router(store, self.router_config())
    }
}

impl Default for TestGallery {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(dir: &Path, file: &str, data: &[u8]) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(file), data).unwrap();
}

// =============================================================================
// Mock Stores
// =============================================================================

/// A store that answers from a fixed list and counts `region_exists` calls.
#[derive(Clone)]
pub struct CountingStore {
    regions: Vec<Region>,
    lookups: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(names: &[&str]) -> Self {
        Self {
            regions: names
                .iter()
                .map(|name| Region {
                    name: name.to_string(),
                    lat: 0.0,
                    long: 0.0,
                })
                .collect(),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegionStore for CountingStore {
    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        Ok(self.regions.clone())
    }

    async fn region_exists(&self, name: &str) -> Result<bool, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.regions.iter().any(|r| r.name == name))
    }
}

/// A store whose every query fails.
pub struct FailingStore;

#[async_trait]
impl RegionStore for FailingStore {
    async fn list_regions(&self) -> Result<Vec<Region>, StoreError> {
        Err(StoreError::Query("relation \"region\" does not exist".to_string()))
    }

    async fn region_exists(&self, _name: &str) -> Result<bool, StoreError> {
        Err(StoreError::Query("relation \"region\" does not exist".to_string()))
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send a request through the router and collect the response.
pub async fn send(router: Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    send(router, Method::GET, uri).await
}

/// The paris scenario: four files in directory order, one of them not an image.
pub fn paris_gallery() -> TestGallery {
    TestGallery::new()
        .with_region("paris", 48.85, 2.35)
        .with_image("paris", "a.png", b"png-bytes")
        .with_image("paris", "b.txt", b"not an image")
        .with_image("paris", "c.jpg", b"jpg-bytes")
        .with_image("paris", "d.webp", b"webp-bytes")
}
