//! Persistence layer: the storage adapter, its backends and the entity
//! repositories. One `Store` handle is constructed at startup and passed
//! to whoever needs data access; each entity's methods live in their own
//! file under `repositories/`.

mod adapter;
mod backend;
pub mod repositories;

pub use adapter::{StorageAdapter, CACHE_FRESHNESS};
pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use repositories::tasks::{sort_tasks, TaskFilter};

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::StorageError;

/// Well-known storage keys, one JSON document each.
pub mod keys {
    pub const USER_SESSION: &str = "sistema_tarefas_user";
    pub const REGISTERED_USERS: &str = "sistema_tarefas_registered_users";
    pub const TASKS: &str = "sistema_tarefas_tasks";
    pub const LISTS: &str = "sistema_tarefas_lists";

    pub const ALL: [&str; 4] = [USER_SESSION, REGISTERED_USERS, TASKS, LISTS];
}

#[derive(Clone)]
pub struct Store {
    adapter: Arc<StorageAdapter>,
}

impl Store {
    pub fn new(adapter: StorageAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }

    /// Opens a file-backed store rooted at `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let backend = FileBackend::new(dir)?;
        Ok(Self::new(StorageAdapter::new(Box::new(backend))))
    }

    /// A store that forgets everything on drop. Used by tests and demos.
    pub fn in_memory() -> Self {
        Self::new(StorageAdapter::new(Box::new(MemoryBackend::new())))
    }

    pub fn adapter(&self) -> &StorageAdapter {
        &self.adapter
    }
}
