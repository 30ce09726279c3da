//! Task repository.

use std::cmp::Ordering;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{StorageError, StoreError};
use crate::models::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus, DEFAULT_LIST_ID};
use crate::store::{keys, Store};

impl Store {
    /// All tasks in stored insertion order. Callers sort as needed.
    pub fn get_tasks(&self) -> Vec<Task> {
        self.adapter().get(keys::TASKS, Vec::new())
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.adapter().save(keys::TASKS, &tasks)
    }

    /// Creates a task from `draft`. The title is required; everything else
    /// takes the documented defaults (pendente, media, default list).
    pub fn add_task(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(StoreError::MissingField("title"));
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: draft.description,
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            list_id: draft
                .list_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LIST_ID.to_string()),
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };

        let mut tasks = self.get_tasks();
        tasks.push(task.clone());
        self.save_tasks(&tasks)?;
        Ok(task)
    }

    /// Merges `patch` onto the stored record. The id is never patchable and
    /// `updated_at` is refreshed on every merge.
    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut tasks = self.get_tasks();
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| StoreError::not_found("task", id))?;

        if let Some(title) = patch.title {
            slot.title = title;
        }
        if let Some(description) = patch.description {
            slot.description = description;
        }
        if let Some(status) = patch.status {
            slot.status = status;
        }
        if let Some(priority) = patch.priority {
            slot.priority = priority;
        }
        if let Some(list_id) = patch.list_id {
            slot.list_id = list_id;
        }
        if let Some(due_date) = patch.due_date {
            slot.due_date = due_date;
        }
        slot.updated_at = Utc::now();

        let updated = slot.clone();
        self.save_tasks(&tasks)?;
        Ok(updated)
    }

    pub fn remove_task(&self, id: &str) -> Result<(), StoreError> {
        let mut tasks = self.get_tasks();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(StoreError::not_found("task", id));
        }
        self.save_tasks(&tasks)?;
        Ok(())
    }

    pub fn get_task_by_id(&self, id: &str) -> Option<Task> {
        self.get_tasks().into_iter().find(|task| task.id == id)
    }

    pub fn find_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.get_tasks()
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect()
    }
}

/// Filter predicate over the task collection. `None` fields match
/// everything; `search` is a case-insensitive substring match over title
/// and description.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub list_id: Option<String>,
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(list_id) = &self.list_id {
            if &task.list_id != list_id {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty()
                && !task.title.to_lowercase().contains(&term)
                && !task.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

/// Display order: priority (urgente first), then due date with dated tasks
/// ahead of undated ones, then most recently created.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
