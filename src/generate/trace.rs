use std::time::Duration;

use chrono::{DateTime, Utc};

/// Outcome of one generation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Success,
    Error,
    Timeout,
}

#[derive(Debug, Clone)]
pub struct PhaseRecord {
    pub phase: &'static str,
    pub status: PhaseStatus,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub detail: Option<String>,
}

/// In-memory diagnostics for one generation run. Phases are appended as they
/// finish and mirrored to the structured log.
#[derive(Debug, Clone, Default)]
pub struct GenerationTrace {
    records: Vec<PhaseRecord>,
}

impl GenerationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        phase: &'static str,
        status: PhaseStatus,
        started_at: DateTime<Utc>,
        duration: Duration,
        detail: Option<String>,
    ) {
        match status {
            PhaseStatus::Success => {
                tracing::debug!(phase, ?duration, "phase done");
            }
            PhaseStatus::Error | PhaseStatus::Timeout => {
                tracing::warn!(
                    phase,
                    ?duration,
                    detail = detail.as_deref().unwrap_or(""),
                    "phase failed"
                );
            }
        }
        self.records.push(PhaseRecord {
            phase,
            status,
            started_at,
            duration,
            detail,
        });
    }

    pub fn records(&self) -> &[PhaseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
