//! Utility modules for prdesk

pub mod dates;
pub mod ids;
