//! Database module for prdesk
//!
//! This module handles the SQLite key-value store behind local storage, using SQLx.

mod engine;
mod kv_table;

pub use engine::DbEngine;
pub use kv_table::KvTable;
