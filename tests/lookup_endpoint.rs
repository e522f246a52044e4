//! Integration tests for the HTTP lookup surface

use axum_test::TestServer;
use serde_json::json;

use emoji_mirror::storage::AssetStorage;
use emoji_mirror::web;

fn server_with(files: &[(&str, &[u8])]) -> (tempfile::TempDir, TestServer) {
    let dir = tempfile::tempdir().unwrap();
    for (name, data) in files {
        std::fs::write(dir.path().join(name), data).unwrap();
    }
    let storage = AssetStorage::new(dir.path().to_path_buf());
    let server = TestServer::new(web::router(storage)).unwrap();
    (dir, server)
}

#[tokio::test]
async fn serves_existing_image_with_content_type() {
    let (_dir, server) = server_with(&[("foo.png", b"pngdata")]);

    let response = server.get("/foo").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().to_vec(), b"pngdata".to_vec());
}

#[tokio::test]
async fn image_responses_are_cacheable() {
    let (_dir, server) = server_with(&[("foo.png", b"pngdata")]);

    let response = server.get("/foo").await;
    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), "public, max-age=86400");
}

#[tokio::test]
async fn missing_item_returns_structured_404() {
    let (_dir, server) = server_with(&[]);

    let response = server.get("/missing").await;
    response.assert_status_not_found();
    response.assert_json(&json!({"success": false, "message": "Image Not Found"}));
}

#[tokio::test]
async fn unmatched_paths_return_structured_404() {
    let (_dir, server) = server_with(&[("foo.png", b"pngdata")]);

    let response = server.get("/").await;
    response.assert_status_not_found();
    response.assert_json(&json!({"success": false, "message": "Not Found"}));

    let response = server.get("/nested/path").await;
    response.assert_status_not_found();
    response.assert_json(&json!({"success": false, "message": "Not Found"}));
}

#[tokio::test]
async fn namespaced_item_names_round_trip_through_sanitization() {
    let (_dir, server) = server_with(&[("category-item.png", b"pngdata")]);

    let response = server.get("/category:item").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
}

#[tokio::test]
async fn extension_probe_prefers_gif_over_png() {
    let (_dir, server) = server_with(&[("foo.png", b"pngdata"), ("foo.gif", b"gifdata")]);

    let response = server.get("/foo").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/gif");
    assert_eq!(response.as_bytes().to_vec(), b"gifdata".to_vec());
}

#[tokio::test]
async fn lookup_probes_every_supported_extension() {
    let (_dir, server) = server_with(&[("vector.svg", b"<svg/>")]);

    let response = server.get("/vector").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/svg+xml");
}
