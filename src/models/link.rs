//! Quick resource links (EPK, media plan, analytics)

use serde::{Deserialize, Serialize};

use super::{non_blank, or_default, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Font Awesome icon class, e.g. `fa-briefcase`
    pub icon: String,
    /// Tailwind background token, e.g. `bg-indigo-500`
    pub color: String,
}

impl QuickLink {
    pub fn from_draft(id: String, draft: LinkDraft) -> Self {
        Self {
            id,
            title: or_default(draft.title, "Ссылка"),
            url: or_default(draft.url, "https://"),
            icon: or_default(draft.icon, "fa-link"),
            color: or_default(draft.color, "bg-indigo-500"),
        }
    }

    /// Host and path without the scheme, as shown under the link card title
    pub fn display_url(&self) -> &str {
        self.url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .unwrap_or(&self.url)
    }
}

impl Record for QuickLink {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl LinkPatch {
    pub fn apply(self, link: &mut QuickLink) {
        if let Some(title) = non_blank(self.title) {
            link.title = title;
        }
        if let Some(url) = non_blank(self.url) {
            link.url = url;
        }
        if let Some(icon) = non_blank(self.icon) {
            link.icon = icon;
        }
        if let Some(color) = non_blank(self.color) {
            link.color = color;
        }
    }
}
