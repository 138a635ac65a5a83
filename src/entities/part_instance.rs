//! PartInstance entity type - one serialized physical part

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One physical, serialized unit of a part type.
///
/// `part_number` points at the catalog entry. The link is resolved
/// best-effort at read time: an instance whose part number has no catalog
/// entry yet is still trackable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartInstance {
    /// Unique surrogate key
    pub instance_id: u32,

    /// Part number of the catalog entry this unit was made to
    pub part_number: String,

    /// Serial number stamped on the unit (unique)
    pub serial_number: String,

    /// Date of manufacture, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<NaiveDate>,

    /// Fields written by other tools, carried through load/save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
