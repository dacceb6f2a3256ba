//! Vanity metrics shown on the statistics tab

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// A read-mostly headline number ("Слушатели в Spotify: 1.24M, +12%")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: String,
    pub label: String,
    pub value: String,
    pub trend: Trend,
    pub trend_value: String,
    pub icon: String,
    pub color: String,
}
