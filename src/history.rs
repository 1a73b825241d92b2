//! Consultation history collaborator.
//!
//! The app only needs `append` and `list`. The in-memory store is what ships;
//! it starts with one synced record so the history view is never blank, and
//! keeps at most `MAX_HISTORY_RECORDS`, dropping the oldest first.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{Assessment, ConsultationRecord, Severity, SyncStatus};

/// Default cap on records held by `InMemoryHistory`.
pub const MAX_HISTORY_RECORDS: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Internal lock error")]
    LockPoisoned,
}

pub trait ConsultationHistory: Send + Sync {
    fn append(&self, record: ConsultationRecord) -> Result<(), HistoryError>;

    /// Records, newest first.
    fn list(&self) -> Result<Vec<ConsultationRecord>, HistoryError>;
}

/// Build a local, not-yet-synced record from a completed assessment.
pub fn record_from_assessment(symptoms: Vec<String>, assessment: &Assessment) -> ConsultationRecord {
    ConsultationRecord {
        id: Uuid::new_v4().to_string(),
        date: Utc::now(),
        summary: assessment.summary.clone(),
        symptoms,
        severity: assessment.severity,
        sync_status: SyncStatus::Local,
        server_id: None,
    }
}

pub struct InMemoryHistory {
    records: Mutex<Vec<ConsultationRecord>>,
    capacity: usize,
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_RECORDS)
    }
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store holding at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Store pre-filled with the sample consultation from two days ago.
    pub fn with_sample() -> Self {
        let sample = ConsultationRecord {
            id: "1".to_string(),
            date: Utc::now() - Duration::days(2),
            summary: "Reported mild fatigue. Advised rest.".to_string(),
            symptoms: vec!["fatigue".to_string()],
            severity: Severity::Mild,
            sync_status: SyncStatus::Synced,
            server_id: Some("HX-99281-A".to_string()),
        };
        Self {
            records: Mutex::new(vec![sample]),
            capacity: MAX_HISTORY_RECORDS,
        }
    }
}

impl ConsultationHistory for InMemoryHistory {
    fn append(&self, record: ConsultationRecord) -> Result<(), HistoryError> {
        let mut records = self.records.lock().map_err(|_| HistoryError::LockPoisoned)?;
        tracing::debug!(id = %record.id, severity = %record.severity, "Consultation recorded");
        records.push(record);
        if records.len() > self.capacity {
            let excess = records.len() - self.capacity;
            records.drain(..excess);
            tracing::debug!(evicted = excess, "History cap reached, oldest records dropped");
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<ConsultationRecord>, HistoryError> {
        let records = self.records.lock().map_err(|_| HistoryError::LockPoisoned)?;
        let mut out = records.clone();
        // Stable: equal timestamps keep newest-appended first after the reverse.
        out.reverse();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }
}
