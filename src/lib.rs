//! Local-first task management core.
//!
//! Users register, log in and organize tasks into lists; everything is
//! persisted locally, one JSON document per well-known key. The crate is
//! the data side of the application only: page controllers, templates and
//! notification rendering live elsewhere and talk to this API.
//!
//! Construct one [`Store`] at startup and hand it (it clones cheaply) to
//! whoever needs data access, plus an [`AuthManager`] for the
//! registration and login flows:
//!
//! ```
//! use sistema_tarefas::{AuthManager, Store, TaskDraft};
//!
//! let store = Store::in_memory();
//! let auth = AuthManager::new(store.clone());
//!
//! let task = store.add_task(TaskDraft {
//!     title: "Ler o relatório".into(),
//!     ..TaskDraft::default()
//! }).unwrap();
//! assert_eq!(task.list_id, "default");
//! assert!(!auth.is_logged_in());
//! ```

pub mod auth;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod validation;


pub use auth::{AuthManager, Credentials, Registration};
pub use error::{AuthError, StorageError, StoreError};
pub use models::{
    ListDraft, ListPatch, Session, Task, TaskDraft, TaskList, TaskPatch, TaskPriority, TaskStatus,
    User, DEFAULT_LIST_ID,
};
pub use stats::TaskStats;
pub use store::{
    sort_tasks, FileBackend, MemoryBackend, StorageAdapter, StorageBackend, Store, TaskFilter,
};
