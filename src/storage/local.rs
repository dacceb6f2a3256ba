//! SQLite-backed storage laid out like the browser's local storage

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

use super::StorageBackend;
use crate::db::{DbEngine, KvTable};
use crate::stores::{sample_data, DashboardData};

pub const KEY_CONTACTS: &str = "pr_contacts";
pub const KEY_PLATFORM_CONTACTS: &str = "pr_platform_contacts";
pub const KEY_LABEL_ARTISTS: &str = "pr_label_artists";
pub const KEY_TRACKS: &str = "pr_tracks";
pub const KEY_RELEASE_PLANS: &str = "pr_release_plans";
pub const KEY_LINKS: &str = "pr_links";
pub const KEY_METRICS: &str = "pr_metrics";

/// One JSON list per key in the `kv_store` table
pub struct LocalStorage {
    engine: DbEngine,
}

impl LocalStorage {
    pub fn new(engine: DbEngine) -> Self {
        Self { engine }
    }

    pub async fn open(db_path: &Path) -> Result<Self> {
        let engine = DbEngine::open(db_path)
            .await
            .with_context(|| format!("Failed to open local storage at {}", db_path.display()))?;
        Ok(Self::new(engine))
    }

    /// Read one list. A missing or unreadable key yields the matching sample
    /// list; the flag reports whether the key was present at all.
    async fn read_list<T: DeserializeOwned>(
        &self,
        key: &str,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> Result<(Vec<T>, bool)> {
        let Some(raw) = KvTable::get(&self.engine, key).await? else {
            return Ok((fallback(), false));
        };

        match serde_json::from_str(&raw) {
            Ok(list) => Ok((list, true)),
            Err(e) => {
                warn!(key, "Stored value is not valid JSON, using sample records: {}", e);
                Ok((fallback(), true))
            }
        }
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn load(&self) -> Result<Option<DashboardData>> {
        let sample = sample_data();

        let (contacts, a) = self.read_list(KEY_CONTACTS, || sample.contacts).await?;
        let (platform_contacts, b) = self
            .read_list(KEY_PLATFORM_CONTACTS, || sample.platform_contacts)
            .await?;
        let (label_artists, c) = self
            .read_list(KEY_LABEL_ARTISTS, || sample.label_artists)
            .await?;
        let (tracks, d) = self.read_list(KEY_TRACKS, || sample.tracks).await?;
        let (release_plans, e) = self
            .read_list(KEY_RELEASE_PLANS, || sample.release_plans)
            .await?;
        let (links, f) = self.read_list(KEY_LINKS, || sample.links).await?;
        let (metrics, g) = self.read_list(KEY_METRICS, || sample.metrics).await?;

        if !(a || b || c || d || e || f || g) {
            return Ok(None);
        }

        Ok(Some(DashboardData {
            contacts,
            platform_contacts,
            label_artists,
            tracks,
            release_plans,
            links,
            metrics,
        }))
    }

    async fn save(&self, data: &DashboardData) -> Result<()> {
        let entries = vec![
            (KEY_CONTACTS, serde_json::to_string(&data.contacts)?),
            (KEY_PLATFORM_CONTACTS, serde_json::to_string(&data.platform_contacts)?),
            (KEY_LABEL_ARTISTS, serde_json::to_string(&data.label_artists)?),
            (KEY_TRACKS, serde_json::to_string(&data.tracks)?),
            (KEY_RELEASE_PLANS, serde_json::to_string(&data.release_plans)?),
            (KEY_LINKS, serde_json::to_string(&data.links)?),
            (KEY_METRICS, serde_json::to_string(&data.metrics)?),
        ];

        KvTable::set_many(&self.engine, &entries).await?;
        debug!(records = data.stats().total(), "Saved dashboard to local storage");
        Ok(())
    }
}
