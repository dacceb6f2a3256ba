//! Free text to structured records
//!
//! The model is asked for a fixed JSON shape. Whatever comes back is merged
//! through the same creation path as manual entry, with import-specific
//! placeholders for missing fields.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::TextGenerator;
use crate::models::{
    ContactCategory, ContactDraft, LinkDraft, PlanDraft, TagsInput, TaskDraft, TrackDraft,
};
use crate::stores::DashboardData;
use crate::utils::ids::prefix;

/// Release date given to extracted tracks that do not mention one
const DEFAULT_IMPORT_DATE: &str = "2025-01-01";

/// Records extracted from a piece of text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contacts: Vec<ImportedContact>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tracks: Vec<ImportedTrack>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub release_plans: Vec<ImportedPlan>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub quick_links: Vec<ImportedLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedContact {
    pub name: Option<String>,
    /// Kept as text so an off-list category does not sink the whole reply
    pub category: Option<String>,
    pub platform: Option<String>,
    pub handle: Option<String>,
    pub contact_url: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedTrack {
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportedPlan {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub tasks: Option<Vec<TaskDraft>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportedLink {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ImportedContact {
    fn into_draft(self) -> ContactDraft {
        let category = self
            .category
            .as_deref()
            .and_then(|c| c.parse::<ContactCategory>().ok())
            .unwrap_or_default();

        ContactDraft {
            name: Some(or_placeholder(self.name, "Без имени")),
            category: Some(category),
            platform: Some(or_placeholder(self.platform, "Соцсеть")),
            handle: self.handle,
            reach: None,
            notes: Some(or_placeholder(self.notes, "Импорт ИИ")),
            contact_url: self.contact_url,
            tags: self.tags.map(TagsInput::List),
            pitching_url: None,
        }
    }
}

impl ImportedTrack {
    fn into_draft(self) -> TrackDraft {
        TrackDraft {
            title: self.title,
            artist_name: self.artist_name,
            release_date: Some(or_placeholder(self.release_date, DEFAULT_IMPORT_DATE)),
            genre: self.genre,
            mood: self.mood,
            ..Default::default()
        }
    }
}

impl ImportedPlan {
    fn into_draft(self) -> PlanDraft {
        PlanDraft {
            title: self.title,
            artist: self.artist,
            date: self.date,
            tasks: self.tasks,
            ..Default::default()
        }
    }
}

impl ImportedLink {
    fn into_draft(self) -> LinkDraft {
        LinkDraft {
            title: self.title,
            url: self.url,
            icon: self.icon,
            color: None,
        }
    }
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

impl ImportPayload {
    pub fn len(&self) -> usize {
        self.contacts.len() + self.tracks.len() + self.release_plans.len() + self.quick_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge into `data` and return how many records were added. Each list
    /// lands at the head of its destination in the order it was extracted.
    pub fn apply(self, data: &mut DashboardData) -> usize {
        let count = self.len();

        for contact in self.contacts.into_iter().rev() {
            data.create_contact_with_prefix(contact.into_draft(), prefix::AI_CONTACT);
        }
        for track in self.tracks.into_iter().rev() {
            data.create_track_with_prefix(track.into_draft(), prefix::AI_TRACK);
        }
        for plan in self.release_plans.into_iter().rev() {
            data.create_plan_with_prefix(plan.into_draft(), prefix::AI_PLAN);
        }
        for link in self.quick_links.into_iter().rev() {
            data.create_link_with_prefix(link.into_draft(), prefix::AI_LINK);
        }

        count
    }
}

pub fn import_prompt(text: &str) -> String {
    format!(
        "Проанализируй текст и извлеки структурированные данные для музыкального лейбла.
ОСОБОЕ ВНИМАНИЕ:
- Разделяй артистов лейбла (Label Artist) от внешних контактов.
- Извлекай задачи для планов релизов.
- Извлекай ссылки на ресурсы (EPK, Drive, Notion).

Текст: \"{}\"",
        text.trim()
    )
}

/// The reply shape the model is held to
pub fn response_schema() -> Value {
    let categories: Vec<&str> = ContactCategory::ALL.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "contacts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "category": {"type": "STRING", "enum": categories},
                        "platform": {"type": "STRING"},
                        "handle": {"type": "STRING"},
                        "contactUrl": {"type": "STRING"},
                        "notes": {"type": "STRING"},
                        "tags": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["name", "category"]
                }
            },
            "tracks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "artistName": {"type": "STRING"},
                        "genre": {"type": "STRING"},
                        "releaseDate": {"type": "STRING"},
                        "mood": {"type": "STRING"}
                    },
                    "required": ["title", "artistName"]
                }
            },
            "releasePlans": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "artist": {"type": "STRING"},
                        "date": {"type": "STRING"},
                        "tasks": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "label": {"type": "STRING"},
                                    "completed": {"type": "BOOLEAN"}
                                }
                            }
                        }
                    },
                    "required": ["title"]
                }
            },
            "quickLinks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "url": {"type": "STRING"},
                        "icon": {"type": "STRING"}
                    },
                    "required": ["title", "url"]
                }
            }
        }
    })
}

/// Parse a model reply. Anything unreadable is an empty result.
pub fn parse_reply(reply: &str) -> ImportPayload {
    let reply = reply.trim();
    if reply.is_empty() {
        return ImportPayload::default();
    }

    serde_json::from_str(reply).unwrap_or_else(|e| {
        warn!("Smart import reply is not the expected JSON: {}", e);
        ImportPayload::default()
    })
}

/// Ask the model to extract records from `text`. Failures yield an empty result.
pub async fn extract(ai: &dyn TextGenerator, text: &str) -> ImportPayload {
    match ai.generate_json(&import_prompt(text), &response_schema()).await {
        Ok(reply) => {
            let payload = parse_reply(&reply);
            info!(
                contacts = payload.contacts.len(),
                tracks = payload.tracks.len(),
                plans = payload.release_plans.len(),
                links = payload.quick_links.len(),
                "Smart import extracted records"
            );
            payload
        }
        Err(e) => {
            error!(provider = ai.name(), "Smart import failed: {}", e);
            ImportPayload::default()
        }
    }
}

/// Message shown after an import
pub fn import_message(count: usize) -> String {
    format!("Успешно импортировано {} объектов!", count)
}
