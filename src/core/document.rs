//! The in-memory document - five ordered record collections

use serde::{Deserialize, Serialize};

use crate::entities::{InstallationRecord, MaintenanceLog, PartInstance, PartMaster, Turbine};

/// Everything the store persists, in one value.
///
/// Collections keep insertion order; order carries no meaning beyond
/// tie-breaking during ID assignment, but it is preserved so iteration and
/// the on-disk file stay stable. The document owns all records outright -
/// cross-references are plain integer and string keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub turbines: Vec<Turbine>,

    #[serde(default)]
    pub part_masters: Vec<PartMaster>,

    #[serde(default)]
    pub part_instances: Vec<PartInstance>,

    #[serde(default)]
    pub installation_records: Vec<InstallationRecord>,

    #[serde(default)]
    pub maintenance_logs: Vec<MaintenanceLog>,
}

/// Next surrogate key for a collection: one past the current maximum, 1 when
/// the collection is empty.
///
/// Recomputed on every call. IDs are never reused - closing an installation
/// record is a field update, not a delete, so the maximum never goes down.
pub fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    ids.max().map_or(1, |max| max + 1)
}

impl Document {
    /// Resolve a turbine by its serial number (first match in insertion order).
    pub fn turbine_by_serial(&self, serial_number: &str) -> Option<&Turbine> {
        self.turbines
            .iter()
            .find(|t| t.serial_number == serial_number)
    }

    pub fn turbine_by_id(&self, turbine_id: u32) -> Option<&Turbine> {
        self.turbines.iter().find(|t| t.turbine_id == turbine_id)
    }

    pub fn turbine_by_id_mut(&mut self, turbine_id: u32) -> Option<&mut Turbine> {
        self.turbines
            .iter_mut()
            .find(|t| t.turbine_id == turbine_id)
    }

    /// Resolve a part instance by its serial number (first match in insertion order).
    pub fn instance_by_serial(&self, serial_number: &str) -> Option<&PartInstance> {
        self.part_instances
            .iter()
            .find(|i| i.serial_number == serial_number)
    }

    pub fn instance_by_id(&self, instance_id: u32) -> Option<&PartInstance> {
        self.part_instances
            .iter()
            .find(|i| i.instance_id == instance_id)
    }

    pub fn master_by_part_number(&self, part_number: &str) -> Option<&PartMaster> {
        self.part_masters
            .iter()
            .find(|m| m.part_number == part_number)
    }

    /// The open installation record for an instance, if it is currently
    /// installed anywhere. First match in insertion order: should corrupt
    /// data ever hold several open records, callers see the oldest.
    pub fn open_record_for(&self, instance_id: u32) -> Option<&InstallationRecord> {
        self.installation_records
            .iter()
            .find(|r| r.instance_id == instance_id && r.is_open())
    }
}
