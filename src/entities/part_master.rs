//! PartMaster entity type - catalog entry for a part type

use serde::{Deserialize, Serialize};

/// A part type in the catalog.
///
/// Describes what a part *is*, not a physical unit; the serialized units are
/// [`PartInstance`](crate::entities::PartInstance) records keyed back to this
/// entry by `part_number`. Catalog entries are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartMaster {
    /// Part number (unique catalog key)
    pub part_number: String,

    /// Short description (e.g. "Stage 1 nozzle")
    pub description: String,

    /// Manufacturer name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub manufacturer: String,

    /// Fields written by other tools, carried through load/save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
