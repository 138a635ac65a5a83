//! MaintenanceLog entity type - free-standing note on a part instance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A maintenance note attached to a part instance. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    /// Unique surrogate key
    pub log_id: u32,

    /// Part instance the work was performed on
    pub instance_id: u32,

    /// What was done
    pub description: String,

    /// When it was logged
    pub log_date: DateTime<Utc>,

    /// Fields written by other tools, carried through load/save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
