//! InstallationRecord entity type - one installation episode

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One continuous interval during which a part instance sat in a turbine.
///
/// A record with no `removal_date` is *open*: the instance is currently
/// installed. Records are created on install and patched on removal; they
/// are never deleted, so the full episode history of every instance stays
/// reconstructable. Invariant: at most one open record per instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationRecord {
    /// Unique surrogate key
    pub installation_id: u32,

    /// Part instance this episode belongs to
    pub instance_id: u32,

    /// Turbine the instance was installed into
    pub turbine_id: u32,

    /// Date the instance went in
    pub installation_date: NaiveDate,

    /// Date the instance came out; absent while installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_date: Option<NaiveDate>,

    /// Turbine fired hours when the episode opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbine_hours_at_install: Option<f64>,

    /// Turbine start count when the episode opened
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbine_starts_at_install: Option<u32>,

    /// Turbine fired hours when the episode closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbine_hours_at_removal: Option<f64>,

    /// Turbine start count when the episode closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbine_starts_at_removal: Option<u32>,

    /// Fields written by other tools, carried through load/save untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InstallationRecord {
    /// An open record marks the instance as currently installed.
    pub fn is_open(&self) -> bool {
        self.removal_date.is_none()
    }

    /// Hours accumulated on the turbine across this episode, when both
    /// endpoint readings were captured.
    pub fn hours_in_service(&self) -> Option<f64> {
        match (self.turbine_hours_at_install, self.turbine_hours_at_removal) {
            (Some(at_install), Some(at_removal)) => Some(at_removal - at_install),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_record_deserialization() {
        let json = r#"{
            "installation_id": 1,
            "instance_id": 1,
            "turbine_id": 1,
            "installation_date": "2024-01-15",
            "turbine_hours_at_install": 50000.5,
            "turbine_starts_at_install": 1200
        }"#;
        let record: InstallationRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_open());
        assert_eq!(record.turbine_hours_at_install, Some(50000.5));
        assert!(record.hours_in_service().is_none());
    }

    #[test]
    fn test_closed_record() {
        let json = r#"{
            "installation_id": 2,
            "instance_id": 1,
            "turbine_id": 1,
            "installation_date": "2024-01-15",
            "removal_date": "2024-06-01",
            "turbine_hours_at_install": 50000.0,
            "turbine_hours_at_removal": 51250.5
        }"#;
        let record: InstallationRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_open());
        assert_eq!(record.hours_in_service(), Some(1250.5));
    }

    #[test]
    fn test_open_record_serializes_without_removal_fields() {
        let record = InstallationRecord {
            installation_id: 1,
            instance_id: 1,
            turbine_id: 1,
            installation_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            removal_date: None,
            turbine_hours_at_install: Some(100.0),
            turbine_starts_at_install: Some(10),
            turbine_hours_at_removal: None,
            turbine_starts_at_removal: None,
            extra: Default::default(),
        };
        let out = serde_json::to_string(&record).unwrap();
        assert!(!out.contains("removal_date"));
        assert!(!out.contains("turbine_hours_at_removal"));
    }
}
