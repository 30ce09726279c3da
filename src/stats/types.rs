use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCounts {
    pub baixa: usize,
    pub media: usize,
    pub alta: usize,
    pub urgente: usize,
}

/// Dashboard snapshot of the task collection: totals by status, by
/// priority and per list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub pendentes: usize,
    pub em_andamento: usize,
    pub concluidas: usize,
    pub canceladas: usize,
    pub por_prioridade: PriorityCounts,
    pub por_lista: BTreeMap<String, usize>,
}

impl TaskStats {
    pub fn status_total(&self) -> usize {
        self.pendentes + self.em_andamento + self.concluidas + self.canceladas
    }

    pub fn priority_total(&self) -> usize {
        let p = &self.por_prioridade;
        p.baixa + p.media + p.alta + p.urgente
    }
}
