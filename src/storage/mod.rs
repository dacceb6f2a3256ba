//! Persistence backends for the dashboard aggregate
//!
//! Both backends hold the same aggregate. The local one splits it across the
//! browser-storage keys in SQLite, the remote one writes it as a single document.

mod local;
mod remote;

pub use local::LocalStorage;
pub use remote::RemoteStorage;

use anyhow::Result;
use async_trait::async_trait;

use crate::stores::DashboardData;

/// Somewhere the dashboard aggregate can be read from and written to
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Read the stored aggregate. `None` means nothing has been saved yet.
    async fn load(&self) -> Result<Option<DashboardData>>;

    /// Replace the stored aggregate with `data`
    async fn save(&self, data: &DashboardData) -> Result<()>;
}
