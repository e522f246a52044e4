//! Catalog fetcher
//!
//! Retrieves the two remote documents that together define, for every
//! item name, zero-or-one downloadable asset id. Both documents are
//! fetched concurrently; either failing fails the whole fetch, so the
//! pipeline never sees a partial catalog.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::UpstreamConfig;
use crate::errors::{FetchError, FetchResult};
use crate::models::{CatalogDocument, ItemIndex};

/// HTTP client for the catalog documents and CDN assets.
///
/// Built once at startup from the upstream configuration; all traffic
/// shares the proxy and the single request timeout.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    catalog_url: Url,
    item_index_url: Url,
    cdn_base_url: String,
}

impl CatalogClient {
    pub fn new(upstream: &UpstreamConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_millis(upstream.timeout_ms));
        if !upstream.proxy_host.is_empty() {
            let proxy_url = format!("http://{}:{}", upstream.proxy_host, upstream.proxy_port);
            builder = builder.proxy(reqwest::Proxy::all(&proxy_url)?);
        }
        Ok(Self {
            client: builder.build()?,
            catalog_url: Url::parse(&upstream.catalog_url)?,
            item_index_url: Url::parse(&upstream.item_index_url)?,
            cdn_base_url: upstream.cdn_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch both catalog documents concurrently.
    ///
    /// No retry: a failed attempt fails the cycle and the next
    /// scheduled cycle retries naturally.
    pub async fn fetch_catalog(&self) -> FetchResult<(CatalogDocument, ItemIndex)> {
        let (catalog, index) = tokio::try_join!(
            self.fetch_json::<CatalogDocument>("emoji catalog", self.catalog_url.clone()),
            self.fetch_json::<ItemIndex>("item index", self.item_index_url.clone()),
        )?;
        debug!(
            "Fetched catalog with {} hashes and index with {} items",
            catalog.len(),
            index.len()
        );
        Ok((catalog, index))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        document: &'static str,
        url: Url,
    ) -> FetchResult<T> {
        debug!("Fetching {} from {}", document, url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { document, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { document, status });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { document, source })?;
        serde_json::from_slice(&bytes).map_err(|source| FetchError::Malformed { document, source })
    }

    /// CDN URL a binary asset is fetched from.
    pub fn asset_url(&self, asset_id: &str) -> String {
        format!("{}/{}", self.cdn_base_url, asset_id)
    }

    /// Underlying reqwest client for asset downloads.
    pub fn inner_client(&self) -> &Client {
        &self.client
    }
}
