//! Daily refresh scheduling
//!
//! One sync cycle runs at process start, then one per day at the
//! configured cron time. The scheduler holds no data beyond the parsed
//! schedule and a handle to the sync service; cycles are idempotent,
//! so a missed or repeated trigger is harmless.

use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use cron::Schedule;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::SchedulerConfig;
use crate::sync::SyncService;

/// Fallback when the configured expression does not parse: daily at
/// midnight.
const DEFAULT_REFRESH_CRON: &str = "0 0 0 * * *";

pub struct RefreshScheduler {
    schedule: Schedule,
    sync: SyncService,
}

impl RefreshScheduler {
    pub fn new(config: &SchedulerConfig, sync: SyncService) -> Self {
        let schedule = match Schedule::from_str(&config.refresh_cron) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!(
                    "Invalid refresh cron expression '{}' ({}), falling back to '{}'",
                    config.refresh_cron, e, DEFAULT_REFRESH_CRON
                );
                Schedule::from_str(DEFAULT_REFRESH_CRON).expect("default cron expression is valid")
            }
        };
        Self { schedule, sync }
    }

    /// Run the startup cycle, then loop on the cron schedule.
    pub async fn run(self) {
        info!("Running startup sync cycle");
        self.sync.run_cycle().await;

        loop {
            let Some(next) = self.schedule.upcoming(Utc).next() else {
                warn!("Refresh schedule has no future occurrences, scheduler exiting");
                return;
            };
            info!("Next catalog refresh scheduled at {}", next);

            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            sleep(wait).await;

            self.sync.run_cycle().await;
        }
    }
}
