//! Agent runtime state: the per-agent progress feedback the surface renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolLogStatus {
    Processing,
    Completed,
}

/// One progress-feedback entry emitted by the backend agent while it works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLogEntry {
    pub id: u64,
    pub message: String,
    pub status: ToolLogStatus,
}

/// State owned by the chat surface for the currently bound agent.
///
/// Reset to empty defaults whenever the user switches agents; mutated by the
/// backend's tool-invocation responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRuntimeState {
    #[serde(default)]
    pub tool_logs: Vec<ToolLogEntry>,
    #[serde(default)]
    pub show_analysis: bool,
    #[serde(default)]
    pub analysis_result: String,
}

impl AgentRuntimeState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a tool log entry.
    ///
    /// The backend re-emits an entry when its status changes, so an existing
    /// id updates that entry in place instead of appending a duplicate.
    pub fn upsert_log(&mut self, entry: ToolLogEntry) {
        match self.tool_logs.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.tool_logs.push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(id: u64, message: &str, status: ToolLogStatus) -> ToolLogEntry {
        ToolLogEntry {
            id,
            message: message.to_string(),
            status,
        }
    }

    #[test]
    fn reset_returns_to_empty_defaults() {
        let mut state = AgentRuntimeState {
            tool_logs: vec![log(1, "Analisando documento", ToolLogStatus::Processing)],
            show_analysis: true,
            analysis_result: "parecer".to_string(),
        };
        state.reset();
        assert_eq!(state, AgentRuntimeState::default());
    }

    #[test]
    fn upsert_appends_new_ids_in_order() {
        let mut state = AgentRuntimeState::default();
        state.upsert_log(log(1, "Passo 1", ToolLogStatus::Processing));
        state.upsert_log(log(2, "Passo 2", ToolLogStatus::Processing));

        let ids: Vec<u64> = state.tool_logs.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn upsert_updates_status_of_existing_id() {
        let mut state = AgentRuntimeState::default();
        state.upsert_log(log(1, "Passo 1", ToolLogStatus::Processing));
        state.upsert_log(log(1, "Passo 1", ToolLogStatus::Completed));

        assert_eq!(state.tool_logs.len(), 1);
        assert_eq!(state.tool_logs[0].status, ToolLogStatus::Completed);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ToolLogStatus::Processing).expect("serialize");
        assert_eq!(json, "\"processing\"");
    }
}
