//! Release campaign model with its checklist

use serde::{Deserialize, Serialize};

use super::{non_blank, or_default, Record};
use crate::utils::dates::today_iso;

/// Checklist every new campaign starts with
const DEFAULT_CHECKLIST: [&str; 3] = ["Мастеринг", "Питчинг", "Промо"];

/// Stage of a release campaign
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    #[default]
    Planning,
    Pitching,
    Finalizing,
    Released,
}

/// One checklist item of a release plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTask {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub completed: bool,
}

/// A release campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePlan {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub date: String,
    pub status: PlanStatus,
    #[serde(default)]
    pub tasks: Vec<PlanTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl ReleasePlan {
    /// Build a plan from form input. Without tasks the default checklist is used.
    pub fn from_draft(id: String, draft: PlanDraft) -> Self {
        let mut tasks: Vec<PlanTask> = draft
            .tasks
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| non_blank(t.label).map(|label| (label, t.completed.unwrap_or(false))))
            .enumerate()
            .map(|(i, (label, completed))| PlanTask {
                id: (i + 1).to_string(),
                label,
                completed,
            })
            .collect();

        if tasks.is_empty() {
            tasks = default_checklist();
        }

        Self {
            id,
            title: or_default(draft.title, "Новый проект"),
            artist: or_default(draft.artist, "Неизвестен"),
            date: non_blank(draft.date).unwrap_or_else(today_iso),
            status: draft.status.unwrap_or_default(),
            tasks,
            budget: non_blank(draft.budget),
        }
    }

    /// Completed share of the checklist, 0..=100
    pub fn progress(&self) -> u8 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.completed).count();
        ((done * 100) / self.tasks.len()) as u8
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut PlanTask> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Record for ReleasePlan {
    fn id(&self) -> &str {
        &self.id
    }
}

fn default_checklist() -> Vec<PlanTask> {
    DEFAULT_CHECKLIST
        .iter()
        .enumerate()
        .map(|(i, label)| PlanTask {
            id: (i + 1).to_string(),
            label: label.to_string(),
            completed: false,
        })
        .collect()
}

/// Checklist item as typed by the user or extracted by smart import
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskDraft {
    pub label: Option<String>,
    pub completed: Option<bool>,
}

/// Create-plan input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanDraft {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub status: Option<PlanStatus>,
    pub budget: Option<String>,
    pub tasks: Option<Vec<TaskDraft>>,
}

/// Update-plan input; checklist items are edited through their own operations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub status: Option<PlanStatus>,
    /// An empty string clears the budget
    pub budget: Option<String>,
}

impl PlanPatch {
    pub fn apply(self, plan: &mut ReleasePlan) {
        if let Some(title) = non_blank(self.title) {
            plan.title = title;
        }
        if let Some(artist) = non_blank(self.artist) {
            plan.artist = artist;
        }
        if let Some(date) = non_blank(self.date) {
            plan.date = date;
        }
        if let Some(status) = self.status {
            plan.status = status;
        }
        if let Some(budget) = self.budget {
            plan.budget = non_blank(Some(budget));
        }
    }
}
