use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Severity, SyncStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub summary: String,
    pub symptoms: Vec<String>,
    pub severity: Severity,
    pub sync_status: SyncStatus,
    pub server_id: Option<String>,
}
