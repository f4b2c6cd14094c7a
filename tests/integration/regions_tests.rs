//! Integration tests for the /api/regions/ endpoint.
//!
//! These tests verify:
//! - Every store row appears with its coordinates
//! - CORS headers on GET and preflight
//! - Store failures surface as 500 without leaking details

use axum::http::{Method, StatusCode};

use super::test_utils::{get, send, FailingStore, TestGallery};

#[tokio::test]
async fn test_regions_list_empty() {
    let gallery = TestGallery::new();

    let response = get(gallery.router(), "/api/regions/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), serde_json::json!({}));
}

#[tokio::test]
async fn test_regions_list_with_results() {
    let gallery = TestGallery::new()
        .with_region("paris", 48.85, 2.35)
        .with_region("tokyo", 35.5, 139.75);

    let response = get(gallery.router(), "/api/regions/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));

    let body = response.json();
    let regions = body.as_object().unwrap();
    assert_eq!(regions.len(), 2);

    let paris_lat = regions["paris"]["Lat"].as_f64().unwrap();
    let paris_long = regions["paris"]["Long"].as_f64().unwrap();
    assert!((paris_lat - 48.85).abs() < 1e-4);
    assert!((paris_long - 2.35).abs() < 1e-4);

    assert_eq!(regions["tokyo"]["Lat"], 35.5);
    assert_eq!(regions["tokyo"]["Long"], 139.75);
}

#[tokio::test]
async fn test_regions_without_trailing_slash() {
    let gallery = TestGallery::new().with_region("paris", 48.85, 2.35);

    let response = get(gallery.router(), "/api/regions").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json().get("paris").is_some());
}

#[tokio::test]
async fn test_regions_allow_any_origin() {
    let gallery = TestGallery::new().with_region("paris", 48.85, 2.35);

    let response = get(gallery.router(), "/api/regions/").await;
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_regions_preflight() {
    let gallery = TestGallery::new();

    let response = send(gallery.router(), Method::OPTIONS, "/api/regions/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));

    assert_eq!(
        response.header("access-control-allow-methods"),
        Some("GET, OPTIONS")
    );

    let headers = response.header("access-control-allow-headers").unwrap();
    assert!(headers.eq_ignore_ascii_case("content-type"));
}

#[tokio::test]
async fn test_regions_store_failure() {
    let gallery = TestGallery::new();

    let response = get(gallery.router_with_store(FailingStore), "/api/regions/").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json();
    assert_eq!(body["error"], "store_error");
    assert!(!body["message"].as_str().unwrap().contains("relation"));
}

#[tokio::test]
async fn test_regions_missing_table() {
    let gallery = TestGallery::new();
    let store = region_gallery::SqliteRegionStore::open(":memory:").unwrap();

    let response = get(gallery.router_with_store(store), "/api/regions/").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_regions_only_accepts_get() {
    let gallery = TestGallery::new().with_region("paris", 48.85, 2.35);

    let response = send(gallery.router(), Method::POST, "/api/regions/").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
