//! List repository.
//!
//! The list collection always contains exactly one record with
//! `is_default` set. It is seeded on first read of an empty collection and
//! can never be removed; removing any other list re-points its tasks at
//! the default list before the record disappears, so no task ever
//! references a list that does not exist.

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::error::{StorageError, StoreError};
use crate::models::{ListDraft, ListPatch, TaskList, DEFAULT_LIST_ID};
use crate::store::{keys, Store};

impl Store {
    /// All lists, seeding the default list when the collection is empty.
    pub fn get_lists(&self) -> Vec<TaskList> {
        let lists: Vec<TaskList> = self.adapter().get(keys::LISTS, Vec::new());
        if !lists.is_empty() {
            return lists;
        }

        let seeded = vec![TaskList::default_seed(Utc::now())];
        match self.save_lists(&seeded) {
            Ok(()) => info!("seeded the default task list"),
            // Degrade to an unpersisted seed; the next read seeds again.
            Err(err) => warn!("failed to persist the seeded default list: {err}"),
        }
        seeded
    }

    pub fn save_lists(&self, lists: &[TaskList]) -> Result<(), StorageError> {
        self.adapter().save(keys::LISTS, &lists)
    }

    pub fn get_list_by_id(&self, id: &str) -> Option<TaskList> {
        self.get_lists().into_iter().find(|list| list.id == id)
    }

    /// The default list, resolved by flag. Falls back to a fresh seed when
    /// no stored record carries the flag.
    pub fn default_list(&self) -> TaskList {
        self.get_lists()
            .into_iter()
            .find(|list| list.is_default)
            .unwrap_or_else(|| TaskList::default_seed(Utc::now()))
    }

    /// Creates a list from `draft`. The name is required and new lists are
    /// never the default.
    pub fn add_list(&self, draft: ListDraft) -> Result<TaskList, StoreError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(StoreError::MissingField("name"));
        }

        let now = Utc::now();
        let list = TaskList {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: draft.description,
            is_default: false,
            created_at: now,
            updated_at: now,
        };

        let mut lists = self.get_lists();
        lists.push(list.clone());
        self.save_lists(&lists)?;
        Ok(list)
    }

    pub fn update_list(&self, id: &str, patch: ListPatch) -> Result<TaskList, StoreError> {
        let mut lists = self.get_lists();
        let slot = lists
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or_else(|| StoreError::not_found("list", id))?;

        if let Some(name) = patch.name {
            slot.name = name;
        }
        if let Some(description) = patch.description {
            slot.description = description;
        }
        slot.updated_at = Utc::now();

        let updated = slot.clone();
        self.save_lists(&lists)?;
        Ok(updated)
    }

    /// Removes a non-default list, first re-pointing every task that
    /// references it at the default list. The task collection is written
    /// before the list collection: if the second write fails, tasks still
    /// point at a list that exists. Returns how many tasks were reassigned.
    pub fn remove_list(&self, id: &str) -> Result<usize, StoreError> {
        let lists = self.get_lists();
        let target = lists
            .iter()
            .find(|list| list.id == id)
            .ok_or_else(|| StoreError::not_found("list", id))?;
        if target.is_default {
            return Err(StoreError::DefaultListProtected);
        }

        let default_id = lists
            .iter()
            .find(|list| list.is_default)
            .map(|list| list.id.clone())
            .unwrap_or_else(|| DEFAULT_LIST_ID.to_string());

        let mut tasks = self.get_tasks();
        let now = Utc::now();
        let mut reassigned = 0;
        for task in tasks.iter_mut().filter(|task| task.list_id == id) {
            task.list_id = default_id.clone();
            task.updated_at = now;
            reassigned += 1;
        }
        if reassigned > 0 {
            self.save_tasks(&tasks)?;
        }

        let remaining: Vec<TaskList> = lists.into_iter().filter(|list| list.id != id).collect();
        self.save_lists(&remaining)?;

        info!("removed list '{id}', reassigned {reassigned} task(s) to the default list");
        Ok(reassigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskDraft, DEFAULT_LIST_ID};

    fn task_in(store: &Store, title: &str, list_id: &str) {
        store
            .add_task(TaskDraft {
                title: title.to_string(),
                list_id: Some(list_id.to_string()),
                ..TaskDraft::default()
            })
            .unwrap();
    }

    #[test]
    fn empty_collection_seeds_the_default_list() {
        let store = Store::in_memory();
        let lists = store.get_lists();
        assert_eq!(lists.len(), 1);
        assert!(lists[0].is_default);
        assert_eq!(lists[0].id, DEFAULT_LIST_ID);
        // The seed is persisted, not recreated on every read.
        let again = store.get_lists();
        assert_eq!(again[0].created_at, lists[0].created_at);
    }

    #[test]
    fn add_list_requires_a_name_and_is_never_default() {
        let store = Store::in_memory();
        assert!(matches!(
            store.add_list(ListDraft::default()),
            Err(StoreError::MissingField("name"))
        ));

        let list = store
            .add_list(ListDraft {
                name: "Trabalho".into(),
                description: String::new(),
            })
            .unwrap();
        assert!(!list.is_default);
        assert_eq!(store.get_lists().len(), 2);
    }

    #[test]
    fn update_list_patches_fields() {
        let store = Store::in_memory();
        let list = store
            .add_list(ListDraft {
                name: "Trabalho".into(),
                description: String::new(),
            })
            .unwrap();

        let updated = store
            .update_list(
                &list.id,
                ListPatch {
                    name: Some("Projetos".into()),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(updated.id, list.id);
        assert_eq!(updated.name, "Projetos");
        assert!(updated.updated_at >= list.updated_at);
    }

    #[test]
    fn remove_list_rejects_the_default_list() {
        let store = Store::in_memory();
        let default_id = store.default_list().id;
        assert!(matches!(
            store.remove_list(&default_id),
            Err(StoreError::DefaultListProtected)
        ));
        assert_eq!(store.get_lists().len(), 1);
    }

    #[test]
    fn remove_list_reassigns_tasks_to_the_default_list() {
        let store = Store::in_memory();
        let work = store
            .add_list(ListDraft {
                name: "Work".into(),
                description: String::new(),
            })
            .unwrap();
        task_in(&store, "um", &work.id);
        task_in(&store, "dois", &work.id);
        task_in(&store, "tres", &work.id);
        task_in(&store, "fora", DEFAULT_LIST_ID);

        let reassigned = store.remove_list(&work.id).unwrap();
        assert_eq!(reassigned, 3);

        let tasks = store.get_tasks();
        assert!(tasks.iter().all(|task| task.list_id == DEFAULT_LIST_ID));
        assert!(store.get_list_by_id(&work.id).is_none());
        assert_eq!(store.get_lists().len(), 1);
    }

    #[test]
    fn remove_list_rejects_unknown_id() {
        let store = Store::in_memory();
        assert!(matches!(
            store.remove_list("nope"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
