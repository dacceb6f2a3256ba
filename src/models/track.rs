//! Track registry model

use serde::{Deserialize, Serialize};

use super::{non_blank, or_default, Record};
use crate::utils::dates::today_iso;

/// Where a track is in the label pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackStatus {
    Signed,
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Released,
}

/// A track in the label's registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_name: String,
    pub status: TrackStatus,
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Link to the WAV / Dropbox / Drive folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_link: Option<String>,
}

impl Track {
    /// Build a track from form input, filling in placeholders for blank fields
    pub fn from_draft(id: String, draft: TrackDraft) -> Self {
        Self {
            id,
            title: or_default(draft.title, "Без названия"),
            artist_name: or_default(draft.artist_name, "Неизвестен"),
            status: draft.status.unwrap_or_default(),
            release_date: non_blank(draft.release_date).unwrap_or_else(today_iso),
            isrc: Some(or_default(draft.isrc, "В ожидании")),
            upc: non_blank(draft.upc),
            genre: Some(or_default(draft.genre, "Pop")),
            mood: Some(or_default(draft.mood, "N/A")),
            asset_link: non_blank(draft.asset_link),
        }
    }

    /// Title or artist match used by the search box
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.artist_name.to_lowercase().contains(&query)
    }
}

impl Record for Track {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Create-track input
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDraft {
    pub title: Option<String>,
    #[serde(alias = "artist")]
    pub artist_name: Option<String>,
    pub status: Option<TrackStatus>,
    #[serde(alias = "date")]
    pub release_date: Option<String>,
    pub isrc: Option<String>,
    pub upc: Option<String>,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub asset_link: Option<String>,
}

/// Update-track input; only present fields are replaced, empty optional fields are cleared
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPatch {
    pub title: Option<String>,
    #[serde(alias = "artist")]
    pub artist_name: Option<String>,
    pub status: Option<TrackStatus>,
    #[serde(alias = "date")]
    pub release_date: Option<String>,
    pub isrc: Option<String>,
    pub upc: Option<String>,
    pub genre: Option<String>,
    pub mood: Option<String>,
    pub asset_link: Option<String>,
}

impl TrackPatch {
    pub fn apply(self, track: &mut Track) {
        if let Some(title) = non_blank(self.title) {
            track.title = title;
        }
        if let Some(artist) = non_blank(self.artist_name) {
            track.artist_name = artist;
        }
        if let Some(status) = self.status {
            track.status = status;
        }
        if let Some(date) = non_blank(self.release_date) {
            track.release_date = date;
        }
        replace_optional(&mut track.isrc, self.isrc);
        replace_optional(&mut track.upc, self.upc);
        replace_optional(&mut track.genre, self.genre);
        replace_optional(&mut track.mood, self.mood);
        replace_optional(&mut track.asset_link, self.asset_link);
    }
}

fn replace_optional(field: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *field = non_blank(Some(value));
    }
}
