//! Task data model.
//!
//! Stored documents use camelCase field names and lower-snake status and
//! priority values, so collections written by earlier releases keep
//! decoding. Unknown status or priority strings decode to the default
//! variant instead of failing the whole collection.

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::list::DEFAULT_LIST_ID;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Pendente,
    EmAndamento,
    Concluida,
    Cancelada,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pendente => "pendente",
            TaskStatus::EmAndamento => "em_andamento",
            TaskStatus::Concluida => "concluida",
            TaskStatus::Cancelada => "cancelada",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pendente" => Some(TaskStatus::Pendente),
            "em_andamento" => Some(TaskStatus::EmAndamento),
            "concluida" => Some(TaskStatus::Concluida),
            "cancelada" => Some(TaskStatus::Cancelada),
            _ => None,
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskStatus::parse(&raw).unwrap_or_else(|| {
            warn!("unknown task status '{raw}', falling back to 'pendente'");
            TaskStatus::default()
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskPriority {
    Baixa,
    #[default]
    Media,
    Alta,
    Urgente,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Baixa => "baixa",
            TaskPriority::Media => "media",
            TaskPriority::Alta => "alta",
            TaskPriority::Urgente => "urgente",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "baixa" => Some(TaskPriority::Baixa),
            "media" => Some(TaskPriority::Media),
            "alta" => Some(TaskPriority::Alta),
            "urgente" => Some(TaskPriority::Urgente),
            _ => None,
        }
    }

    /// Display weight used when ordering tasks, highest urgency first.
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Urgente => 4,
            TaskPriority::Alta => 3,
            TaskPriority::Media => 2,
            TaskPriority::Baixa => 1,
        }
    }
}

impl Serialize for TaskPriority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskPriority::parse(&raw).unwrap_or_else(|| {
            warn!("unknown task priority '{raw}', falling back to 'media'");
            TaskPriority::default()
        }))
    }
}

fn default_list_id() -> String {
    DEFAULT_LIST_ID.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default = "default_list_id")]
    pub list_id: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. Missing fields take the documented defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub list_id: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Field-wise update for an existing task. `None` leaves a field untouched;
/// `due_date` is doubly optional so `Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub list_id: Option<String>,
    pub due_date: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TaskStatus::Pendente,
            TaskStatus::EmAndamento,
            TaskStatus::Concluida,
            TaskStatus::Cancelada,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_and_priority_decode_to_defaults() {
        let raw = r#"{
            "id": "t1",
            "title": "Revisar documento",
            "status": "arquivada",
            "priority": "altissima",
            "createdAt": "2026-01-10T12:00:00Z",
            "updatedAt": "2026-01-10T12:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.status, TaskStatus::Pendente);
        assert_eq!(task.priority, TaskPriority::Media);
        assert_eq!(task.list_id, DEFAULT_LIST_ID);
        assert!(task.description.is_empty());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn task_serializes_with_camel_case_wire_names() {
        let task = Task {
            id: "t1".into(),
            title: "Comprar mantimentos".into(),
            description: String::new(),
            status: TaskStatus::EmAndamento,
            priority: TaskPriority::Alta,
            list_id: DEFAULT_LIST_ID.into(),
            due_date: None,
            created_at: "2026-01-10T12:00:00Z".parse().unwrap(),
            updated_at: "2026-01-10T12:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "em_andamento");
        assert_eq!(value["priority"], "alta");
        assert_eq!(value["listId"], "default");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn priority_rank_orders_urgency() {
        assert!(TaskPriority::Urgente.rank() > TaskPriority::Alta.rank());
        assert!(TaskPriority::Alta.rank() > TaskPriority::Media.rank());
        assert!(TaskPriority::Media.rank() > TaskPriority::Baixa.rank());
    }
}
