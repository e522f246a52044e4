//! Sync orchestrator
//!
//! Drives one full refresh cycle: snapshot the store, fetch the
//! catalog, resolve targets, fan the downloads out concurrently and
//! wait for every one to settle. Individual download failures are
//! logged and counted, never propagated; only a failed catalog fetch
//! fails the cycle.

pub mod downloader;
pub mod resolver;

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::catalog::CatalogClient;
use crate::storage::AssetStorage;

pub use downloader::AssetDownloader;
pub use resolver::resolve_targets;

#[derive(Clone)]
pub struct SyncService {
    client: CatalogClient,
    storage: AssetStorage,
    downloader: AssetDownloader,
    cycle_guard: Arc<Mutex<()>>,
}

impl SyncService {
    pub fn new(client: CatalogClient, storage: AssetStorage) -> Self {
        let downloader = AssetDownloader::new(client.clone(), storage.clone());
        Self {
            client,
            storage,
            downloader,
            cycle_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Run one full sync cycle.
    ///
    /// Returns `true` when the catalog fetch succeeded and every
    /// resolved target was attempted, `false` when the fetch (or the
    /// store scan before it) failed. A cycle that finds another cycle
    /// still in flight is skipped and also reports `false`.
    pub async fn run_cycle(&self) -> bool {
        let Ok(_guard) = self.cycle_guard.try_lock() else {
            warn!("Sync cycle already in flight, skipping");
            return false;
        };

        let cycle_start = Instant::now();
        info!("Starting catalog sync cycle");

        if let Err(e) = self.storage.ensure_dir().await {
            error!("Failed to create output directory: {}", e);
            return false;
        }

        let existing = match self.storage.snapshot_stems().await {
            Ok(stems) => stems,
            Err(e) => {
                error!("Failed to scan output directory: {}", e);
                return false;
            }
        };

        let (catalog, index) = match self.client.fetch_catalog().await {
            Ok(documents) => documents,
            Err(e) => {
                error!("Catalog fetch failed: {}", e);
                return false;
            }
        };

        let targets = resolve_targets(&catalog, &index, &existing);
        if targets.is_empty() {
            info!(
                "Sync cycle complete: all {} items already materialized or unresolvable, took {:?}",
                index.len(),
                cycle_start.elapsed()
            );
            return true;
        }

        // All-settled fan-out: every download runs to completion
        // regardless of sibling outcomes.
        let outcomes = join_all(
            targets
                .iter()
                .map(|target| self.downloader.download(target)),
        )
        .await;

        let mut downloaded = 0usize;
        let mut failed = 0usize;
        for (target, outcome) in targets.iter().zip(&outcomes) {
            match outcome {
                Ok(()) => downloaded += 1,
                Err(e) => {
                    failed += 1;
                    warn!("Omitting '{}': {}", target.item_name, e);
                }
            }
        }

        info!(
            "Sync cycle complete: {} items, {} attempted, {} downloaded, {} failed, {} skipped, took {:?}",
            index.len(),
            targets.len(),
            downloaded,
            failed,
            index.len() - targets.len(),
            cycle_start.elapsed()
        );
        true
    }
}
