//! The dashboard aggregate and every mutation the dashboard performs on it
//!
//! Contacts are split across three partitions by category. Every operation here
//! keeps that split consistent: a contact always sits in the partition its
//! category names, exactly once.

use serde::{Deserialize, Serialize};

use crate::models::{
    Contact, ContactCategory, ContactDraft, ContactPatch, LinkDraft, LinkPatch, Metric,
    Partition, PlanDraft, PlanPatch, PlanTask, QuickLink, Record, ReleasePlan, Track, TrackDraft,
    TrackPatch,
};
use crate::utils::ids::{generate_id, prefix};

/// Everything the dashboard persists, as a single unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Bloggers, artists, agencies and media
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub platform_contacts: Vec<Contact>,
    #[serde(default)]
    pub label_artists: Vec<Contact>,
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub release_plans: Vec<ReleasePlan>,
    #[serde(default)]
    pub links: Vec<QuickLink>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// Record counts per list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub contacts: usize,
    pub label_artists: usize,
    pub platform_contacts: usize,
    pub tracks: usize,
    pub release_plans: usize,
    pub links: usize,
    pub metrics: usize,
    pub open_tasks: usize,
}

impl DashboardStats {
    /// Number of records across every list
    pub fn total(&self) -> usize {
        self.contacts
            + self.label_artists
            + self.platform_contacts
            + self.tracks
            + self.release_plans
            + self.links
            + self.metrics
    }
}

impl DashboardData {
    // ========== Contacts ==========

    pub fn partition(&self, partition: Partition) -> &[Contact] {
        match partition {
            Partition::General => &self.contacts,
            Partition::LabelArtists => &self.label_artists,
            Partition::PlatformCurators => &self.platform_contacts,
        }
    }

    fn partition_mut(&mut self, partition: Partition) -> &mut Vec<Contact> {
        match partition {
            Partition::General => &mut self.contacts,
            Partition::LabelArtists => &mut self.label_artists,
            Partition::PlatformCurators => &mut self.platform_contacts,
        }
    }

    /// Create a contact from form input at the head of its partition
    pub fn create_contact(&mut self, draft: ContactDraft) -> Contact {
        self.create_contact_with_prefix(draft, prefix::CONTACT)
    }

    pub fn create_contact_with_prefix(&mut self, draft: ContactDraft, id_prefix: &str) -> Contact {
        let contact = Contact::from_draft(self.fresh_id(id_prefix), draft);
        self.insert_contact(contact.clone());
        contact
    }

    /// Put a contact at the head of the partition its category names
    pub fn insert_contact(&mut self, contact: Contact) {
        self.partition_mut(contact.partition()).insert(0, contact);
    }

    pub fn find_contact(&self, id: &str) -> Option<&Contact> {
        self.locate_contact(id)
            .map(|(partition, index)| &self.partition(partition)[index])
    }

    fn locate_contact(&self, id: &str) -> Option<(Partition, usize)> {
        Partition::ALL.into_iter().find_map(|partition| {
            find_index(self.partition(partition), id).map(|index| (partition, index))
        })
    }

    /// Edit a contact in place. A category change moves it to the head of
    /// its new partition.
    pub fn update_contact(&mut self, id: &str, patch: ContactPatch) -> Option<Contact> {
        let (from, index) = self.locate_contact(id)?;

        let mut contact = self.partition(from)[index].clone();
        patch.apply(&mut contact);

        let to = contact.partition();
        if to == from {
            self.partition_mut(from)[index] = contact.clone();
        } else {
            self.partition_mut(from).remove(index);
            self.partition_mut(to).insert(0, contact.clone());
        }

        Some(contact)
    }

    /// Remove every contact with this id, whichever partition holds it
    pub fn delete_contact(&mut self, id: &str) -> Option<Contact> {
        let mut removed = None;
        for partition in Partition::ALL {
            let list = self.partition_mut(partition);
            while let Some(contact) = remove_by_id(list, id) {
                removed.get_or_insert(contact);
            }
        }
        removed
    }

    /// General contacts matching a name query and an optional category filter
    pub fn search_contacts(&self, query: &str, category: Option<ContactCategory>) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| c.matches(query))
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .cloned()
            .collect()
    }

    pub fn search_partition(&self, partition: Partition, query: &str) -> Vec<Contact> {
        self.partition(partition)
            .iter()
            .filter(|c| c.matches(query))
            .cloned()
            .collect()
    }

    /// Move every contact whose category disagrees with its list into the
    /// right one, keeping relative order. Returns how many moved.
    pub fn normalize_partitions(&mut self) -> usize {
        let mut misplaced = Vec::new();

        for partition in Partition::ALL {
            let list = std::mem::take(self.partition_mut(partition));
            let (keep, moved): (Vec<Contact>, Vec<Contact>) =
                list.into_iter().partition(|c| c.partition() == partition);
            *self.partition_mut(partition) = keep;
            misplaced.extend(moved);
        }

        let count = misplaced.len();
        for contact in misplaced {
            self.partition_mut(contact.partition()).push(contact);
        }
        count
    }

    pub fn partitions_consistent(&self) -> bool {
        Partition::ALL
            .into_iter()
            .all(|p| self.partition(p).iter().all(|c| c.partition() == p))
    }

    // ========== Tracks ==========

    pub fn create_track(&mut self, draft: TrackDraft) -> Track {
        self.create_track_with_prefix(draft, prefix::TRACK)
    }

    pub fn create_track_with_prefix(&mut self, draft: TrackDraft, id_prefix: &str) -> Track {
        let track = Track::from_draft(self.fresh_id(id_prefix), draft);
        self.tracks.insert(0, track.clone());
        track
    }

    pub fn update_track(&mut self, id: &str, patch: TrackPatch) -> Option<Track> {
        update_by_id(&mut self.tracks, id, |track| patch.apply(track))
    }

    pub fn delete_track(&mut self, id: &str) -> Option<Track> {
        remove_by_id(&mut self.tracks, id)
    }

    pub fn search_tracks(&self, query: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.matches(query))
            .cloned()
            .collect()
    }

    // ========== Release plans ==========

    pub fn create_plan(&mut self, draft: PlanDraft) -> ReleasePlan {
        self.create_plan_with_prefix(draft, prefix::PLAN)
    }

    pub fn create_plan_with_prefix(&mut self, draft: PlanDraft, id_prefix: &str) -> ReleasePlan {
        let plan = ReleasePlan::from_draft(self.fresh_id(id_prefix), draft);
        self.release_plans.insert(0, plan.clone());
        plan
    }

    pub fn update_plan(&mut self, id: &str, patch: PlanPatch) -> Option<ReleasePlan> {
        update_by_id(&mut self.release_plans, id, |plan| patch.apply(plan))
    }

    pub fn delete_plan(&mut self, id: &str) -> Option<ReleasePlan> {
        remove_by_id(&mut self.release_plans, id)
    }

    pub fn search_plans(&self, query: &str) -> Vec<ReleasePlan> {
        self.release_plans
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect()
    }

    /// Flip one checklist item. Sibling tasks are left as they are.
    pub fn toggle_task(&mut self, plan_id: &str, task_id: &str) -> Option<ReleasePlan> {
        let index = find_index(&self.release_plans, plan_id)?;
        let plan = &mut self.release_plans[index];
        let task = plan.task_mut(task_id)?;
        task.completed = !task.completed;
        Some(plan.clone())
    }

    pub fn add_task(&mut self, plan_id: &str, label: &str) -> Option<ReleasePlan> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        let index = find_index(&self.release_plans, plan_id)?;
        let plan = &mut self.release_plans[index];

        let mut task_id = generate_id(prefix::TASK);
        while plan.tasks.iter().any(|t| t.id == task_id) {
            task_id = generate_id(prefix::TASK);
        }

        plan.tasks.push(PlanTask {
            id: task_id,
            label: label.to_string(),
            completed: false,
        });
        Some(plan.clone())
    }

    pub fn remove_task(&mut self, plan_id: &str, task_id: &str) -> Option<ReleasePlan> {
        let index = find_index(&self.release_plans, plan_id)?;
        let plan = &mut self.release_plans[index];
        let position = plan.tasks.iter().position(|t| t.id == task_id)?;
        plan.tasks.remove(position);
        Some(plan.clone())
    }

    // ========== Links ==========

    pub fn create_link(&mut self, draft: LinkDraft) -> QuickLink {
        self.create_link_with_prefix(draft, prefix::LINK)
    }

    pub fn create_link_with_prefix(&mut self, draft: LinkDraft, id_prefix: &str) -> QuickLink {
        let link = QuickLink::from_draft(self.fresh_id(id_prefix), draft);
        self.links.insert(0, link.clone());
        link
    }

    pub fn update_link(&mut self, id: &str, patch: LinkPatch) -> Option<QuickLink> {
        update_by_id(&mut self.links, id, |link| patch.apply(link))
    }

    pub fn delete_link(&mut self, id: &str) -> Option<QuickLink> {
        remove_by_id(&mut self.links, id)
    }

    // ========== Whole store ==========

    /// Whether any record already uses this identifier
    pub fn contains_id(&self, id: &str) -> bool {
        self.locate_contact(id).is_some()
            || find_index(&self.tracks, id).is_some()
            || find_index(&self.release_plans, id).is_some()
            || find_index(&self.links, id).is_some()
    }

    fn fresh_id(&self, id_prefix: &str) -> String {
        loop {
            let id = generate_id(id_prefix);
            if !self.contains_id(&id) {
                return id;
            }
        }
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            contacts: self.contacts.len(),
            label_artists: self.label_artists.len(),
            platform_contacts: self.platform_contacts.len(),
            tracks: self.tracks.len(),
            release_plans: self.release_plans.len(),
            links: self.links.len(),
            metrics: self.metrics.len(),
            open_tasks: self
                .release_plans
                .iter()
                .flat_map(|p| p.tasks.iter())
                .filter(|t| !t.completed)
                .count(),
        }
    }
}

fn find_index<T: Record>(list: &[T], id: &str) -> Option<usize> {
    list.iter().position(|item| item.id() == id)
}

fn remove_by_id<T: Record>(list: &mut Vec<T>, id: &str) -> Option<T> {
    find_index(list, id).map(|index| list.remove(index))
}

/// Edit the matching entry in place and return a copy of the result
fn update_by_id<T, F>(list: &mut [T], id: &str, f: F) -> Option<T>
where
    T: Record + Clone,
    F: FnOnce(&mut T),
{
    let index = find_index(list, id)?;
    f(&mut list[index]);
    Some(list[index].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanStatus;
    use crate::stores::sample_data;

    fn draft(name: &str, category: ContactCategory) -> ContactDraft {
        ContactDraft {
            name: Some(name.to_string()),
            category: Some(category),
            ..Default::default()
        }
    }

    fn partitions_holding(data: &DashboardData, id: &str) -> Vec<Partition> {
        Partition::ALL
            .into_iter()
            .filter(|p| data.partition(*p).iter().any(|c| c.id == id))
            .collect()
    }

    #[test]
    fn test_create_contact_lands_in_exactly_one_partition() {
        for category in ContactCategory::ALL {
            let mut data = DashboardData::default();
            let contact = data.create_contact(draft("Test", category));

            assert!(contact.id.starts_with("c-"));
            assert_eq!(partitions_holding(&data, &contact.id), vec![category.partition()]);
            assert!(data.partitions_consistent());
        }
    }

    #[test]
    fn test_create_inserts_at_head() {
        let mut data = sample_data();
        let contact = data.create_contact(draft("Новый блогер", ContactCategory::Media));
        assert_eq!(data.contacts[0].id, contact.id);
        assert_eq!(data.contacts.len(), 3);

        let track = data.create_track(TrackDraft::default());
        assert_eq!(data.tracks[0].id, track.id);
        assert!(track.id.starts_with("t-"));
    }

    #[test]
    fn test_category_edit_moves_contact_between_partitions() {
        let mut data = sample_data();
        let before = data.stats();

        let patch = ContactPatch {
            category: Some(ContactCategory::LabelArtist),
            ..Default::default()
        };
        let moved = data.update_contact("2", patch).unwrap();

        assert_eq!(moved.category, ContactCategory::LabelArtist);
        assert_eq!(partitions_holding(&data, "2"), vec![Partition::LabelArtists]);
        assert_eq!(data.label_artists[0].id, "2");
        assert_eq!(data.contacts.len(), before.contacts - 1);
        assert_eq!(data.label_artists.len(), before.label_artists + 1);
        assert!(data.partitions_consistent());
    }

    #[test]
    fn test_edit_within_partition_keeps_position() {
        let mut data = sample_data();
        let patch = ContactPatch {
            category: Some(ContactCategory::Agency),
            reach: Some("300k".into()),
            ..Default::default()
        };
        data.update_contact("2", patch).unwrap();

        assert_eq!(data.contacts[1].id, "2");
        assert_eq!(data.contacts[1].reach, "300k");
        assert_eq!(data.contacts[1].category, ContactCategory::Agency);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut data = sample_data();
        let before = data.clone();

        assert!(data.update_contact("missing", ContactPatch::default()).is_none());
        assert!(data.update_track("missing", TrackPatch::default()).is_none());
        assert!(data.update_plan("missing", PlanPatch::default()).is_none());
        assert!(data.update_link("missing", LinkPatch::default()).is_none());
        assert_eq!(data, before);
    }

    #[test]
    fn test_delete_contact_clears_duplicate_ids() {
        let mut data = sample_data();
        let mut copy = data.platform_contacts[0].clone();
        copy.category = ContactCategory::Media;
        data.contacts.push(copy);

        let removed = data.delete_contact("pc-1").unwrap();
        assert_eq!(removed.id, "pc-1");
        assert!(data.find_contact("pc-1").is_none());
        assert_eq!(data.contacts.len(), 2);
        assert_eq!(data.platform_contacts.len(), 1);
    }

    #[test]
    fn test_delete_removes_exactly_one_record() {
        let mut data = sample_data();
        let before = data.clone();

        assert!(data.delete_contact("pc-1").is_some());

        assert_eq!(data.platform_contacts.len(), before.platform_contacts.len() - 1);
        assert_eq!(data.platform_contacts[0].id, "pc-3");
        assert_eq!(data.contacts, before.contacts);
        assert_eq!(data.label_artists, before.label_artists);
        assert_eq!(data.tracks, before.tracks);
        assert_eq!(data.links, before.links);

        assert!(data.delete_contact("pc-1").is_none());
        assert!(data.delete_track("t2").is_some());
        assert_eq!(data.tracks.len(), 1);
        assert!(data.delete_link("3").is_some());
        assert!(data.delete_plan("rp1").is_some());
        assert!(data.release_plans.is_empty());
    }

    #[test]
    fn test_shared_ids_across_kinds_only_touch_the_named_kind() {
        // sample contact "1" and sample link "1" share an identifier
        let mut data = sample_data();
        assert!(data.delete_link("1").is_some());
        assert!(data.find_contact("1").is_some());
    }

    #[test]
    fn test_toggle_task_flips_only_target() {
        let mut data = sample_data();
        let before = data.release_plans[0].tasks.clone();

        let plan = data.toggle_task("rp1", "tsk3").unwrap();

        for (old, new) in before.iter().zip(plan.tasks.iter()) {
            if old.id == "tsk3" {
                assert_eq!(new.completed, !old.completed);
            } else {
                assert_eq!(new, old);
            }
        }

        data.toggle_task("rp1", "tsk3").unwrap();
        assert_eq!(data.release_plans[0].tasks, before);

        assert!(data.toggle_task("rp1", "nope").is_none());
        assert!(data.toggle_task("nope", "tsk1").is_none());
    }

    #[test]
    fn test_add_and_remove_task() {
        let mut data = sample_data();
        assert!(data.add_task("rp1", "   ").is_none());

        let plan = data.add_task("rp1", "Клип снят").unwrap();
        let added = plan.tasks.last().unwrap().clone();
        assert_eq!(added.label, "Клип снят");
        assert!(!added.completed);
        assert_eq!(plan.tasks.len(), 5);

        let plan = data.remove_task("rp1", &added.id).unwrap();
        assert_eq!(plan.tasks.len(), 4);
        assert!(data.remove_task("rp1", &added.id).is_none());
    }

    #[test]
    fn test_update_plan_keeps_position() {
        let mut data = sample_data();
        data.create_plan(PlanDraft::default());

        let plan = data
            .update_plan(
                "rp1",
                PlanPatch {
                    status: Some(PlanStatus::Finalizing),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(plan.status, PlanStatus::Finalizing);
        assert_eq!(data.release_plans[1].id, "rp1");
    }

    #[test]
    fn test_search() {
        let data = sample_data();

        let hits = data.search_contacts("луна", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");

        assert_eq!(data.search_contacts("", Some(ContactCategory::Blogger)).len(), 1);
        assert!(data.search_contacts("луна", Some(ContactCategory::Blogger)).is_empty());

        assert_eq!(data.search_partition(Partition::PlatformCurators, "spotify").len(), 1);
        assert_eq!(data.search_tracks("mira").len(), 1);
        assert_eq!(data.search_tracks("").len(), 2);
        assert_eq!(data.search_plans("neon").len(), 1);
    }

    #[test]
    fn test_normalize_partitions() {
        let mut data = sample_data();
        let mut stray = data.contacts.remove(0);
        stray.category = ContactCategory::PlatformCurator;
        data.label_artists.push(stray);
        assert!(!data.partitions_consistent());

        assert_eq!(data.normalize_partitions(), 1);
        assert!(data.partitions_consistent());
        assert_eq!(data.platform_contacts.last().unwrap().id, "1");
        assert_eq!(data.normalize_partitions(), 0);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut data = sample_data();
        data.create_contact(draft("Новый", ContactCategory::LabelArtist));
        data.create_plan(PlanDraft::default());

        let json = serde_json::to_string(&data).unwrap();
        let restored: DashboardData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, data);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("platformContacts").is_some());
        assert!(value.get("releasePlans").is_some());
    }

    #[test]
    fn test_missing_lists_deserialize_empty() {
        let data: DashboardData = serde_json::from_str(r#"{"tracks":[]}"#).unwrap();
        assert_eq!(data, DashboardData::default());
    }

    #[test]
    fn test_stats() {
        let stats = sample_data().stats();
        assert_eq!(stats.contacts, 2);
        assert_eq!(stats.open_tasks, 2);
        assert_eq!(stats.total(), 2 + 1 + 2 + 2 + 1 + 3 + 4);
    }
}
