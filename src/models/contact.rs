//! Contact model and its category partitioning

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{non_blank, or_default, Record};

/// Who a contact is to the label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactCategory {
    #[default]
    Blogger,
    Artist,
    Agency,
    Media,
    #[serde(rename = "Label Artist")]
    LabelArtist,
    #[serde(rename = "Platform Curator")]
    PlatformCurator,
}

impl ContactCategory {
    pub const ALL: [ContactCategory; 6] = [
        ContactCategory::Blogger,
        ContactCategory::Artist,
        ContactCategory::Agency,
        ContactCategory::Media,
        ContactCategory::LabelArtist,
        ContactCategory::PlatformCurator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactCategory::Blogger => "Blogger",
            ContactCategory::Artist => "Artist",
            ContactCategory::Agency => "Agency",
            ContactCategory::Media => "Media",
            ContactCategory::LabelArtist => "Label Artist",
            ContactCategory::PlatformCurator => "Platform Curator",
        }
    }

    /// Display label shown on contact cards
    pub fn label(&self) -> &'static str {
        match self {
            ContactCategory::Blogger => "Блогер",
            ContactCategory::Artist => "Артист",
            ContactCategory::Agency => "Агентство",
            ContactCategory::Media => "СМИ",
            ContactCategory::LabelArtist => "Артист лейбла",
            ContactCategory::PlatformCurator => "Куратор",
        }
    }

    /// The contact list a category lives in
    pub fn partition(&self) -> Partition {
        match self {
            ContactCategory::LabelArtist => Partition::LabelArtists,
            ContactCategory::PlatformCurator => Partition::PlatformCurators,
            _ => Partition::General,
        }
    }
}

impl fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactCategory {
    type Err = String;

    /// Accepts the wire spelling as well as loose variants ("label_artist", "platform curator")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        ContactCategory::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown contact category: {}", s))
    }
}

/// One of the three category-specific contact lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    General,
    LabelArtists,
    PlatformCurators,
}

impl Partition {
    pub const ALL: [Partition; 3] = [
        Partition::General,
        Partition::LabelArtists,
        Partition::PlatformCurators,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::General => "general",
            Partition::LabelArtists => "label_artists",
            Partition::PlatformCurators => "platform_curators",
        }
    }
}

/// A PR contact: blogger, artist, agency, media outlet, label artist or curator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub category: ContactCategory,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub handle: String,
    /// Audience reach as the user typed it ("250k", "1.2M ежемесячно")
    #[serde(default)]
    pub reach: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contact_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Submission portal for platform curators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitching_url: Option<String>,
}

impl Contact {
    /// Build a contact from form input, filling in placeholders for blank fields
    pub fn from_draft(id: String, draft: ContactDraft) -> Self {
        Self {
            id,
            name: or_default(draft.name, "Новый контакт"),
            category: draft.category.unwrap_or_default(),
            platform: or_default(draft.platform, "Instagram"),
            handle: or_default(draft.handle, "@"),
            reach: or_default(draft.reach, "н/д"),
            notes: draft.notes.unwrap_or_default(),
            contact_url: draft.contact_url.unwrap_or_default(),
            tags: draft.tags.map(TagsInput::into_tags).unwrap_or_default(),
            pitching_url: non_blank(draft.pitching_url),
        }
    }

    pub fn partition(&self) -> Partition {
        self.category.partition()
    }

    /// Case-insensitive name match used by the search box
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Tags arrive either as a list or as the comma-separated text of the form field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            TagsInput::List(tags) => tags,
            TagsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };

        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Create-contact input
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: Option<String>,
    pub category: Option<ContactCategory>,
    pub platform: Option<String>,
    pub handle: Option<String>,
    pub reach: Option<String>,
    pub notes: Option<String>,
    #[serde(alias = "url")]
    pub contact_url: Option<String>,
    pub tags: Option<TagsInput>,
    pub pitching_url: Option<String>,
}

/// Update-contact input; only present fields are replaced
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub name: Option<String>,
    pub category: Option<ContactCategory>,
    pub platform: Option<String>,
    pub handle: Option<String>,
    pub reach: Option<String>,
    pub notes: Option<String>,
    #[serde(alias = "url")]
    pub contact_url: Option<String>,
    pub tags: Option<TagsInput>,
    /// An empty string clears the portal link
    pub pitching_url: Option<String>,
}

impl ContactPatch {
    pub fn apply(self, contact: &mut Contact) {
        if let Some(name) = non_blank(self.name) {
            contact.name = name;
        }
        if let Some(category) = self.category {
            contact.category = category;
        }
        if let Some(platform) = self.platform {
            contact.platform = platform;
        }
        if let Some(handle) = self.handle {
            contact.handle = handle;
        }
        if let Some(reach) = self.reach {
            contact.reach = reach;
        }
        if let Some(notes) = self.notes {
            contact.notes = notes;
        }
        if let Some(url) = self.contact_url {
            contact.contact_url = url;
        }
        if let Some(tags) = self.tags {
            contact.tags = tags.into_tags();
        }
        if let Some(url) = self.pitching_url {
            contact.pitching_url = non_blank(Some(url));
        }
    }
}
