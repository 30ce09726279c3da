//! Read-side task statistics.
//!
//! Holds no state of its own; every call recomputes from the task
//! collection. Records with unknown status or priority were already
//! normalized to the defaults at decode time, so every task lands in
//! exactly one bucket per dimension and the bucket sums always match
//! `total`.

mod types;

pub use types::{PriorityCounts, TaskStats};

use crate::models::{Task, TaskPriority, TaskStatus};
use crate::store::Store;

pub fn compute(tasks: &[Task]) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Pendente => stats.pendentes += 1,
            TaskStatus::EmAndamento => stats.em_andamento += 1,
            TaskStatus::Concluida => stats.concluidas += 1,
            TaskStatus::Cancelada => stats.canceladas += 1,
        }
        match task.priority {
            TaskPriority::Baixa => stats.por_prioridade.baixa += 1,
            TaskPriority::Media => stats.por_prioridade.media += 1,
            TaskPriority::Alta => stats.por_prioridade.alta += 1,
            TaskPriority::Urgente => stats.por_prioridade.urgente += 1,
        }
        *stats.por_lista.entry(task.list_id.clone()).or_insert(0) += 1;
    }

    stats
}

impl Store {
    pub fn task_stats(&self) -> TaskStats {
        compute(&self.get_tasks())
    }
}
