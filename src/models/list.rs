//! Task list data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seed id for the default list. Default-list resolution goes through the
/// `isDefault` flag; this literal only names the record seeded into an
/// empty collection.
pub const DEFAULT_LIST_ID: &str = "default";
pub const DEFAULT_LIST_NAME: &str = "Tarefas Gerais";
pub const DEFAULT_LIST_DESCRIPTION: &str = "Lista padrão para tarefas gerais";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    /// The record seeded into an empty list collection.
    pub fn default_seed(now: DateTime<Utc>) -> Self {
        Self {
            id: DEFAULT_LIST_ID.to_string(),
            name: DEFAULT_LIST_NAME.to_string(),
            description: DEFAULT_LIST_DESCRIPTION.to_string(),
            is_default: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a list. New lists are never the default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDraft {
    pub name: String,
    pub description: String,
}

/// Field-wise update for an existing list. The `isDefault` flag is not
/// patchable; exactly one default list exists per installation.
#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}
