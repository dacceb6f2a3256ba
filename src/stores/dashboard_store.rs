//! Shared, persisted dashboard state

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::{sample_data, DashboardData, DashboardStats};
use crate::storage::StorageBackend;

/// The in-memory aggregate plus the backend every change is written to
pub struct DashboardStore {
    data: RwLock<DashboardData>,
    backend: Option<Arc<dyn StorageBackend>>,
    /// Held from a change until its save completes, so saves land in change order
    persist_lock: Mutex<()>,
}

impl DashboardStore {
    pub fn new(data: DashboardData, backend: Option<Arc<dyn StorageBackend>>) -> Self {
        Self {
            data: RwLock::new(data),
            backend,
            persist_lock: Mutex::new(()),
        }
    }

    /// A store that is never persisted
    #[cfg(test)]
    pub fn in_memory(data: DashboardData) -> Self {
        Self::new(data, None)
    }

    /// Load the aggregate from `backend`. Unreadable storage falls back to the
    /// sample records; so does empty storage when `seed` is set.
    pub async fn open(backend: Arc<dyn StorageBackend>, seed: bool) -> Self {
        let data = match backend.load().await {
            Ok(Some(mut data)) => {
                let moved = data.normalize_partitions();
                if moved > 0 {
                    warn!("Moved {} stored contacts into their category's list", moved);
                }
                info!(
                    "Loaded {} records from {} storage",
                    data.stats().total(),
                    backend.name()
                );
                data
            }
            Ok(None) if seed => {
                info!("Nothing stored yet, starting with sample records");
                sample_data()
            }
            Ok(None) => DashboardData::default(),
            Err(e) => {
                warn!(
                    "Failed to read {} storage, using sample records: {:#}",
                    backend.name(),
                    e
                );
                sample_data()
            }
        };

        Self::new(data, Some(backend))
    }

    /// A copy of the whole aggregate
    pub fn snapshot(&self) -> DashboardData {
        self.data.read().clone()
    }

    pub fn read<R>(&self, f: impl FnOnce(&DashboardData) -> R) -> R {
        f(&self.data.read())
    }

    /// Apply a change under the write lock, then persist the result
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut DashboardData) -> R) -> R {
        let _persisting = self.persist_lock.lock().await;

        let (result, snapshot) = {
            let mut data = self.data.write();
            let result = f(&mut data);
            debug_assert!(data.partitions_consistent());
            (result, data.clone())
        };

        self.persist(&snapshot).await;
        result
    }

    /// Swap the whole aggregate, moving contacts into the list their category names
    pub async fn replace_all(&self, mut data: DashboardData) -> DashboardStats {
        data.normalize_partitions();
        let stats = data.stats();
        self.mutate(move |current| *current = data).await;
        stats
    }

    async fn persist(&self, snapshot: &DashboardData) {
        let Some(backend) = &self.backend else {
            return;
        };

        if let Err(e) = backend.save(snapshot).await {
            error!("Failed to save dashboard to {} storage: {:#}", backend.name(), e);
        }
    }
}
