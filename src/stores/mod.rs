//! In-memory dashboard state and the bundled sample records

mod dashboard;
mod dashboard_store;
mod sample_data;

pub use dashboard::{DashboardData, DashboardStats};
pub use dashboard_store::DashboardStore;
pub use sample_data::sample_data;
