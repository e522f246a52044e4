//! Asset downloader
//!
//! Fetches a single binary asset and persists it under the extension
//! derived from the response's declared content type. Each download is
//! its own failure domain: an error here never touches sibling items.

use tracing::{debug, info};

use crate::catalog::CatalogClient;
use crate::errors::{DownloadError, DownloadResult};
use crate::models::ResolvedTarget;
use crate::storage::{AssetStorage, extension_for_content_type};

#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: CatalogClient,
    storage: AssetStorage,
}

impl AssetDownloader {
    pub fn new(client: CatalogClient, storage: AssetStorage) -> Self {
        Self { client, storage }
    }

    /// Download one asset and write `<sanitized>.<ext>`.
    ///
    /// The extension comes from the response's `Content-Type` header;
    /// an unrecognized type fails the item before anything is written.
    /// Overwriting is not guarded: the resolver already filtered names
    /// that exist on disk.
    pub async fn download(&self, target: &ResolvedTarget) -> DownloadResult<()> {
        let url = self.client.asset_url(&target.asset_id);
        debug!("Downloading asset for '{}' from {}", target.item_name, url);

        let response = self
            .client
            .inner_client()
            .get(&url)
            .send()
            .await
            .map_err(|source| DownloadError::Transport {
                item: target.item_name.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                item: target.item_name.clone(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let Some(extension) = extension_for_content_type(&content_type) else {
            return Err(DownloadError::UnknownContentType {
                item: target.item_name.clone(),
                content_type,
            });
        };

        let data = response
            .bytes()
            .await
            .map_err(|source| DownloadError::Transport {
                item: target.item_name.clone(),
                source,
            })?;

        let path = self
            .storage
            .write_asset(&target.sanitized_name, extension, &data)
            .await
            .map_err(|source| DownloadError::Write {
                item: target.item_name.clone(),
                source,
            })?;

        info!("Cached '{}' as {}", target.item_name, path.display());
        Ok(())
    }
}
