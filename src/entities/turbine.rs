//! Turbine entity type - a physical unit in the fleet

use serde::{Deserialize, Serialize};

/// A turbine that parts get installed into.
///
/// The serial number is the key operators use everywhere; `turbine_id` is
/// the relational key the installation records point at. The hour/start
/// counters track the most recent readings and are brought up to date when
/// a part is removed with fresh readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turbine {
    /// Unique surrogate key
    pub turbine_id: u32,

    /// Turbine serial number (unique across the fleet)
    pub serial_number: String,

    /// Frame type (e.g. "7FA", "GE 1.5sle")
    pub frame_type: String,

    /// Site or plant where the unit operates
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Cumulative fired hours at the last recorded reading
    #[serde(default)]
    pub current_total_hours: f64,

    /// Cumulative start count at the last recorded reading
    #[serde(default)]
    pub current_total_starts: u32,

    /// Fields written by other tools, carried through load/save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
