//! Lookup request handlers

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tokio::fs;
use tracing::debug;

use crate::errors::WebError;
use crate::storage::AssetStorage;
use crate::web::responses;

/// `GET /{item_id}`: serve the materialized image for an item name.
///
/// Probes the supported extensions in priority order and returns the
/// first match. Read-only; the lookup path never triggers a download
/// and never waits on a sync cycle.
pub async fn lookup_item(
    State(storage): State<AssetStorage>,
    Path(item_id): Path<String>,
) -> Result<Response, WebError> {
    let Some((path, content_type)) = storage.find_existing(&item_id) else {
        debug!("No image for item '{}'", item_id);
        return Ok(responses::image_not_found());
    };

    let data = fs::read(&path).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    Ok((StatusCode::OK, headers, data).into_response())
}

/// Any path the router does not match.
pub async fn fallback() -> Response {
    responses::not_found()
}
