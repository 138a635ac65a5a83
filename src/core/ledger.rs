//! Lifecycle ledger - registration, the install/remove state machine, and
//! history queries
//!
//! The ledger owns the in-memory document and the store behind it. Every
//! mutating operation validates against the current document first, applies
//! the change, then saves exactly once; a failed operation saves nothing and
//! leaves every collection untouched. There is no staged state - a record
//! returned from a mutation is already durable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core::document::{next_id, Document};
use crate::core::store::{Store, StoreError};
use crate::entities::{InstallationRecord, MaintenanceLog, PartInstance, PartMaster, Turbine};

/// Errors reported by ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no part instance with serial number '{0}'")]
    PartNotFound(String),

    #[error("no turbine with serial number '{0}'")]
    TurbineNotFound(String),

    #[error("no part instance with id {0}")]
    InstanceNotFound(u32),

    #[error("part '{0}' is already installed in a turbine")]
    AlreadyInstalled(String),

    #[error("part '{0}' has no active installation")]
    NoActiveInstallation(String),

    #[error("a turbine with serial number '{0}' already exists")]
    DuplicateTurbineSerial(String),

    #[error("a part instance with serial number '{0}' already exists")]
    DuplicateInstanceSerial(String),

    #[error("part number '{0}' is already in the catalog")]
    DuplicatePartNumber(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Field set for registering a turbine
#[derive(Debug, Clone, Default)]
pub struct NewTurbine {
    pub serial_number: String,
    pub frame_type: String,
    pub location: String,
    pub hours: f64,
    pub starts: u32,
}

/// Field set for a catalog entry
#[derive(Debug, Clone, Default)]
pub struct NewPartMaster {
    pub part_number: String,
    pub description: String,
    pub manufacturer: String,
}

/// Field set for registering a serialized part instance
#[derive(Debug, Clone, Default)]
pub struct NewPartInstance {
    pub part_number: String,
    pub serial_number: String,
    pub manufacture_date: Option<NaiveDate>,
}

/// Read-side join of everything known about one part instance.
#[derive(Debug, Serialize)]
pub struct LifecycleView<'a> {
    pub instance: &'a PartInstance,
    /// Catalog entry, when the instance's part number resolves to one
    pub master: Option<&'a PartMaster>,
    /// Every installation episode, open and closed, in insertion order
    pub installations: Vec<&'a InstallationRecord>,
    /// Every maintenance note, in insertion order
    pub maintenance: Vec<&'a MaintenanceLog>,
}

/// The lifecycle core. Generic over the store so tests can substitute an
/// in-memory one and count save calls.
pub struct Ledger<S: Store> {
    document: Document,
    store: S,
}

impl<S: Store> Ledger<S> {
    /// Load the document behind `store` and wrap it in a ledger.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let document = store.load()?;
        Ok(Self { document, store })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        self.store.save(&self.document)?;
        Ok(())
    }

    /// Register a turbine. Serial numbers are unique across the fleet.
    pub fn add_turbine(&mut self, new: NewTurbine) -> Result<Turbine, LedgerError> {
        if self.document.turbine_by_serial(&new.serial_number).is_some() {
            return Err(LedgerError::DuplicateTurbineSerial(new.serial_number));
        }

        let turbine = Turbine {
            turbine_id: next_id(self.document.turbines.iter().map(|t| t.turbine_id)),
            serial_number: new.serial_number,
            frame_type: new.frame_type,
            location: new.location,
            current_total_hours: new.hours,
            current_total_starts: new.starts,
            extra: Default::default(),
        };
        self.document.turbines.push(turbine.clone());
        self.persist()?;
        Ok(turbine)
    }

    /// Add a part type to the catalog. Part numbers are unique.
    pub fn add_part_master(&mut self, new: NewPartMaster) -> Result<PartMaster, LedgerError> {
        if self.document.master_by_part_number(&new.part_number).is_some() {
            return Err(LedgerError::DuplicatePartNumber(new.part_number));
        }

        let master = PartMaster {
            part_number: new.part_number,
            description: new.description,
            manufacturer: new.manufacturer,
            extra: Default::default(),
        };
        self.document.part_masters.push(master.clone());
        self.persist()?;
        Ok(master)
    }

    /// Register a serialized part instance. Serial numbers are unique; the
    /// part number is not required to resolve to a catalog entry yet.
    pub fn add_part_instance(&mut self, new: NewPartInstance) -> Result<PartInstance, LedgerError> {
        if self.document.instance_by_serial(&new.serial_number).is_some() {
            return Err(LedgerError::DuplicateInstanceSerial(new.serial_number));
        }

        let instance = PartInstance {
            instance_id: next_id(self.document.part_instances.iter().map(|i| i.instance_id)),
            part_number: new.part_number,
            serial_number: new.serial_number,
            manufacture_date: new.manufacture_date,
            extra: Default::default(),
        };
        self.document.part_instances.push(instance.clone());
        self.persist()?;
        Ok(instance)
    }

    /// Attach a maintenance note to a part instance, by serial number.
    /// `log_date` defaults to now.
    pub fn add_maintenance_log(
        &mut self,
        part_serial: &str,
        description: String,
        log_date: Option<DateTime<Utc>>,
    ) -> Result<MaintenanceLog, LedgerError> {
        let instance_id = self
            .document
            .instance_by_serial(part_serial)
            .ok_or_else(|| LedgerError::PartNotFound(part_serial.to_string()))?
            .instance_id;

        let log = MaintenanceLog {
            log_id: next_id(self.document.maintenance_logs.iter().map(|l| l.log_id)),
            instance_id,
            description,
            log_date: log_date.unwrap_or_else(Utc::now),
            extra: Default::default(),
        };
        self.document.maintenance_logs.push(log.clone());
        self.persist()?;
        Ok(log)
    }

    /// Install a part instance into a turbine, opening a new installation
    /// episode.
    ///
    /// Fails if the instance already has an open episode anywhere - a part
    /// cannot be installed twice, not even "again" into the turbine it is
    /// already in. The new record snapshots the turbine's current counters
    /// into the at-install fields. `date` defaults to today.
    pub fn install(
        &mut self,
        part_serial: &str,
        turbine_serial: &str,
        date: Option<NaiveDate>,
    ) -> Result<InstallationRecord, LedgerError> {
        let instance_id = self
            .document
            .instance_by_serial(part_serial)
            .ok_or_else(|| LedgerError::PartNotFound(part_serial.to_string()))?
            .instance_id;

        let (turbine_id, hours, starts) = {
            let turbine = self
                .document
                .turbine_by_serial(turbine_serial)
                .ok_or_else(|| LedgerError::TurbineNotFound(turbine_serial.to_string()))?;
            (
                turbine.turbine_id,
                turbine.current_total_hours,
                turbine.current_total_starts,
            )
        };

        if self.document.open_record_for(instance_id).is_some() {
            return Err(LedgerError::AlreadyInstalled(part_serial.to_string()));
        }

        let record = InstallationRecord {
            installation_id: next_id(
                self.document
                    .installation_records
                    .iter()
                    .map(|r| r.installation_id),
            ),
            instance_id,
            turbine_id,
            installation_date: date.unwrap_or_else(|| Utc::now().date_naive()),
            removal_date: None,
            turbine_hours_at_install: Some(hours),
            turbine_starts_at_install: Some(starts),
            turbine_hours_at_removal: None,
            turbine_starts_at_removal: None,
            extra: Default::default(),
        };
        self.document.installation_records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Close the active installation episode for a part instance.
    ///
    /// When fresh counter readings are supplied the turbine is brought up to
    /// date first, so its counters and the record's at-removal snapshot
    /// agree. The record is patched in place, never replaced. Should the
    /// document ever hold more than one open record for the instance, only
    /// the first in insertion order is closed. `date` defaults to today.
    pub fn remove(
        &mut self,
        part_serial: &str,
        date: Option<NaiveDate>,
        hours: Option<f64>,
        starts: Option<u32>,
    ) -> Result<InstallationRecord, LedgerError> {
        let instance_id = self
            .document
            .instance_by_serial(part_serial)
            .ok_or_else(|| LedgerError::PartNotFound(part_serial.to_string()))?
            .instance_id;

        let position = self
            .document
            .installation_records
            .iter()
            .position(|r| r.instance_id == instance_id && r.is_open())
            .ok_or_else(|| LedgerError::NoActiveInstallation(part_serial.to_string()))?;

        let turbine_id = self.document.installation_records[position].turbine_id;
        if let Some(turbine) = self.document.turbine_by_id_mut(turbine_id) {
            if let Some(hours) = hours {
                turbine.current_total_hours = hours;
            }
            if let Some(starts) = starts {
                turbine.current_total_starts = starts;
            }
        }

        // Snapshot after the counter update; falls back to the supplied
        // readings when the record points at a turbine that no longer
        // resolves (externally corrupted data).
        let snapshot = self
            .document
            .turbine_by_id(turbine_id)
            .map(|t| (t.current_total_hours, t.current_total_starts));

        let record = &mut self.document.installation_records[position];
        record.removal_date = Some(date.unwrap_or_else(|| Utc::now().date_naive()));
        record.turbine_hours_at_removal = snapshot.map(|(h, _)| h).or(hours);
        record.turbine_starts_at_removal = snapshot.map(|(_, s)| s).or(starts);
        let record = record.clone();

        self.persist()?;
        Ok(record)
    }

    /// Part instances currently installed in a turbine: those with an open
    /// record pointing at it. Closed episodes never contribute.
    pub fn installed_parts(&self, turbine_id: u32) -> Vec<&PartInstance> {
        self.document
            .installation_records
            .iter()
            .filter(|r| r.turbine_id == turbine_id && r.is_open())
            .filter_map(|r| self.document.instance_by_id(r.instance_id))
            .collect()
    }

    /// Full history of one part instance: the instance itself, its catalog
    /// entry when resolvable, and every installation episode and
    /// maintenance note in insertion order.
    pub fn lifecycle(&self, instance_id: u32) -> Result<LifecycleView<'_>, LedgerError> {
        let instance = self
            .document
            .instance_by_id(instance_id)
            .ok_or(LedgerError::InstanceNotFound(instance_id))?;

        Ok(LifecycleView {
            instance,
            master: self.document.master_by_part_number(&instance.part_number),
            installations: self
                .document
                .installation_records
                .iter()
                .filter(|r| r.instance_id == instance_id)
                .collect(),
            maintenance: self
                .document
                .maintenance_logs
                .iter()
                .filter(|l| l.instance_id == instance_id)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// In-memory store that counts save calls.
    struct MemoryStore {
        seed: Document,
        saves: Rc<Cell<usize>>,
        fail_saves: bool,
    }

    impl MemoryStore {
        fn new() -> (Self, Rc<Cell<usize>>) {
            Self::with_seed(Document::default())
        }

        fn with_seed(seed: Document) -> (Self, Rc<Cell<usize>>) {
            let saves = Rc::new(Cell::new(0usize));
            (
                Self {
                    seed,
                    saves: Rc::clone(&saves),
                    fail_saves: false,
                },
                saves,
            )
        }
    }

    impl Store for MemoryStore {
        fn load(&self) -> Result<Document, StoreError> {
            Ok(self.seed.clone())
        }

        fn save(&self, _document: &Document) -> Result<(), StoreError> {
            if self.fail_saves {
                return Err(StoreError::Unwritable {
                    path: "memory".into(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Ledger pre-loaded with one master, one instance, and two turbines.
    /// The save counter is reset so tests count only their own mutations.
    fn seeded_ledger() -> (Ledger<MemoryStore>, Rc<Cell<usize>>) {
        let (store, saves) = MemoryStore::new();
        let mut ledger = Ledger::open(store).unwrap();

        ledger
            .add_part_master(NewPartMaster {
                part_number: "PN-1001".to_string(),
                description: "Main Bearing".to_string(),
                manufacturer: String::new(),
            })
            .unwrap();
        ledger
            .add_part_instance(NewPartInstance {
                part_number: "PN-1001".to_string(),
                serial_number: "PI-SN-001".to_string(),
                manufacture_date: None,
            })
            .unwrap();
        ledger
            .add_turbine(NewTurbine {
                serial_number: "T-SN-101".to_string(),
                frame_type: "GE 1.5sle".to_string(),
                location: "Wind Farm Alpha".to_string(),
                hours: 50000.5,
                starts: 1200,
            })
            .unwrap();
        ledger
            .add_turbine(NewTurbine {
                serial_number: "T-SN-102".to_string(),
                frame_type: "GE 1.5sle".to_string(),
                location: "Wind Farm Alpha".to_string(),
                hours: 12000.0,
                starts: 300,
            })
            .unwrap();

        saves.set(0);
        (ledger, saves)
    }

    #[test]
    fn test_registration_assigns_monotonic_ids() {
        let (mut ledger, _) = seeded_ledger();

        let mut previous = 0;
        for n in 0..3 {
            let instance = ledger
                .add_part_instance(NewPartInstance {
                    part_number: "PN-1001".to_string(),
                    serial_number: format!("PI-SN-10{n}"),
                    manufacture_date: None,
                })
                .unwrap();
            assert!(instance.instance_id > previous);
            previous = instance.instance_id;
        }
    }

    #[test]
    fn test_duplicate_turbine_serial_rejected() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger
            .add_turbine(NewTurbine {
                serial_number: "T-SN-101".to_string(),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateTurbineSerial(_)));
        assert_eq!(ledger.document().turbines.len(), 2);
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_duplicate_part_number_rejected() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger
            .add_part_master(NewPartMaster {
                part_number: "PN-1001".to_string(),
                description: "duplicate".to_string(),
                manufacturer: String::new(),
            })
            .unwrap_err();

        assert!(matches!(err, LedgerError::DuplicatePartNumber(_)));
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_duplicate_instance_serial_rejected() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger
            .add_part_instance(NewPartInstance {
                part_number: "PN-9999".to_string(),
                serial_number: "PI-SN-001".to_string(),
                manufacture_date: None,
            })
            .unwrap_err();

        assert!(matches!(err, LedgerError::DuplicateInstanceSerial(_)));
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_install_opens_record_with_counter_snapshot() {
        let (mut ledger, saves) = seeded_ledger();

        let record = ledger
            .install("PI-SN-001", "T-SN-101", Some(date(2024, 1, 15)))
            .unwrap();

        assert!(record.is_open());
        assert_eq!(record.installation_date, date(2024, 1, 15));
        assert_eq!(record.turbine_hours_at_install, Some(50000.5));
        assert_eq!(record.turbine_starts_at_install, Some(1200));
        assert_eq!(saves.get(), 1);
    }

    #[test]
    fn test_install_unknown_part() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger.install("PI-SN-404", "T-SN-101", None).unwrap_err();
        assert!(matches!(err, LedgerError::PartNotFound(_)));
        assert!(ledger.document().installation_records.is_empty());
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_install_unknown_turbine() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger.install("PI-SN-001", "T-SN-404", None).unwrap_err();
        assert!(matches!(err, LedgerError::TurbineNotFound(_)));
        assert!(ledger.document().installation_records.is_empty());
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_install_blocks_reinstall() {
        let (mut ledger, _) = seeded_ledger();
        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();

        let err = ledger.install("PI-SN-001", "T-SN-102", None).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyInstalled(_)));
        assert_eq!(ledger.document().installation_records.len(), 1);
    }

    #[test]
    fn test_install_blocks_reinstall_into_same_turbine() {
        let (mut ledger, _) = seeded_ledger();
        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();

        // No no-op short circuit: same turbine is still a conflict
        let err = ledger.install("PI-SN-001", "T-SN-101", None).unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyInstalled(_)));
        assert_eq!(ledger.document().installation_records.len(), 1);
    }

    #[test]
    fn test_remove_requires_active_installation() {
        let (mut ledger, saves) = seeded_ledger();

        let err = ledger.remove("PI-SN-001", None, None, None).unwrap_err();
        assert!(matches!(err, LedgerError::NoActiveInstallation(_)));
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_remove_closes_the_record_in_place() {
        let (mut ledger, saves) = seeded_ledger();
        let opened = ledger.install("PI-SN-001", "T-SN-101", None).unwrap();

        let closed = ledger
            .remove("PI-SN-001", Some(date(2024, 6, 1)), None, None)
            .unwrap();

        assert_eq!(closed.installation_id, opened.installation_id);
        assert_eq!(closed.removal_date, Some(date(2024, 6, 1)));
        // No readings supplied: snapshot of the unchanged turbine counters
        assert_eq!(closed.turbine_hours_at_removal, Some(50000.5));
        assert_eq!(closed.turbine_starts_at_removal, Some(1200));
        assert_eq!(ledger.document().installation_records.len(), 1);
        assert_eq!(saves.get(), 2);
    }

    #[test]
    fn test_remove_with_readings_updates_turbine_counters() {
        let (mut ledger, _) = seeded_ledger();
        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();

        let closed = ledger
            .remove("PI-SN-001", None, Some(51250.0), Some(1234))
            .unwrap();

        assert_eq!(closed.turbine_hours_at_removal, Some(51250.0));
        assert_eq!(closed.turbine_starts_at_removal, Some(1234));

        let turbine = ledger.document().turbine_by_serial("T-SN-101").unwrap();
        assert_eq!(turbine.current_total_hours, 51250.0);
        assert_eq!(turbine.current_total_starts, 1234);
    }

    #[test]
    fn test_second_remove_fails() {
        let (mut ledger, _) = seeded_ledger();
        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();
        ledger.remove("PI-SN-001", None, None, None).unwrap();

        let err = ledger.remove("PI-SN-001", None, None, None).unwrap_err();
        assert!(matches!(err, LedgerError::NoActiveInstallation(_)));
    }

    #[test]
    fn test_remove_closes_only_first_open_record() {
        // Externally corrupted seed: two open records for the same instance.
        let (store, _) = MemoryStore::new();
        let mut ledger = Ledger::open(store).unwrap();
        ledger
            .add_part_instance(NewPartInstance {
                part_number: "PN-1001".to_string(),
                serial_number: "PI-SN-001".to_string(),
                manufacture_date: None,
            })
            .unwrap();
        ledger
            .add_turbine(NewTurbine {
                serial_number: "T-SN-101".to_string(),
                frame_type: "7FA".to_string(),
                ..Default::default()
            })
            .unwrap();
        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();

        let mut corrupted = ledger.document().clone();
        let mut second = corrupted.installation_records[0].clone();
        second.installation_id = 2;
        corrupted.installation_records.push(second);

        let (store, _) = MemoryStore::with_seed(corrupted);
        let mut ledger = Ledger::open(store).unwrap();
        ledger.remove("PI-SN-001", None, None, None).unwrap();

        let records = &ledger.document().installation_records;
        assert!(!records[0].is_open());
        assert!(records[1].is_open());
    }

    #[test]
    fn test_at_most_one_open_record_over_many_episodes() {
        let (mut ledger, _) = seeded_ledger();

        for turbine in ["T-SN-101", "T-SN-102", "T-SN-101"] {
            ledger.install("PI-SN-001", turbine, None).unwrap();
            let open = ledger
                .document()
                .installation_records
                .iter()
                .filter(|r| r.is_open())
                .count();
            assert_eq!(open, 1);
            ledger.remove("PI-SN-001", None, None, None).unwrap();
            let open = ledger
                .document()
                .installation_records
                .iter()
                .filter(|r| r.is_open())
                .count();
            assert_eq!(open, 0);
        }
        assert_eq!(ledger.document().installation_records.len(), 3);
    }

    #[test]
    fn test_lifecycle_completeness_across_turbines() {
        let (mut ledger, _) = seeded_ledger();
        let instance_id = ledger.document().instance_by_serial("PI-SN-001").unwrap().instance_id;
        let first_turbine_id = ledger.document().turbine_by_serial("T-SN-101").unwrap().turbine_id;
        let second_turbine_id = ledger.document().turbine_by_serial("T-SN-102").unwrap().turbine_id;

        ledger
            .install("PI-SN-001", "T-SN-101", Some(date(2024, 1, 15)))
            .unwrap();
        ledger
            .remove("PI-SN-001", Some(date(2024, 6, 1)), None, None)
            .unwrap();
        ledger
            .install("PI-SN-001", "T-SN-102", Some(date(2024, 7, 1)))
            .unwrap();

        let view = ledger.lifecycle(instance_id).unwrap();
        assert_eq!(view.installations.len(), 2);
        assert_eq!(view.installations[0].turbine_id, first_turbine_id);
        assert_eq!(view.installations[0].removal_date, Some(date(2024, 6, 1)));
        assert_eq!(view.installations[1].turbine_id, second_turbine_id);
        assert!(view.installations[1].is_open());
        assert_eq!(view.master.unwrap().part_number, "PN-1001");
    }

    #[test]
    fn test_lifecycle_unknown_instance() {
        let (ledger, _) = seeded_ledger();
        let err = ledger.lifecycle(404).unwrap_err();
        assert!(matches!(err, LedgerError::InstanceNotFound(404)));
    }

    #[test]
    fn test_lifecycle_without_catalog_entry() {
        let (mut ledger, _) = seeded_ledger();
        let orphan = ledger
            .add_part_instance(NewPartInstance {
                part_number: "PN-UNCATALOGED".to_string(),
                serial_number: "PI-SN-900".to_string(),
                manufacture_date: None,
            })
            .unwrap();

        let view = ledger.lifecycle(orphan.instance_id).unwrap();
        assert!(view.master.is_none());
    }

    #[test]
    fn test_lifecycle_collects_maintenance_in_order() {
        let (mut ledger, _) = seeded_ledger();
        let instance_id = ledger.document().instance_by_serial("PI-SN-001").unwrap().instance_id;

        ledger
            .add_maintenance_log("PI-SN-001", "Initial inspection complete.".to_string(), None)
            .unwrap();
        ledger
            .add_maintenance_log("PI-SN-001", "Seals replaced.".to_string(), None)
            .unwrap();

        let view = ledger.lifecycle(instance_id).unwrap();
        assert_eq!(view.maintenance.len(), 2);
        assert_eq!(view.maintenance[0].description, "Initial inspection complete.");
        assert_eq!(view.maintenance[1].description, "Seals replaced.");
    }

    #[test]
    fn test_maintenance_log_unknown_part() {
        let (mut ledger, saves) = seeded_ledger();
        let err = ledger
            .add_maintenance_log("PI-SN-404", "ghost work".to_string(), None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::PartNotFound(_)));
        assert_eq!(saves.get(), 0);
    }

    #[test]
    fn test_installed_parts_tracks_open_records() {
        let (mut ledger, _) = seeded_ledger();
        let turbine_id = ledger.document().turbine_by_serial("T-SN-101").unwrap().turbine_id;

        assert!(ledger.installed_parts(turbine_id).is_empty());

        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();
        let installed = ledger.installed_parts(turbine_id);
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].serial_number, "PI-SN-001");

        ledger.remove("PI-SN-001", None, None, None).unwrap();
        assert!(ledger.installed_parts(turbine_id).is_empty());
    }

    #[test]
    fn test_every_successful_mutation_saves_exactly_once() {
        let (mut ledger, saves) = seeded_ledger();

        ledger.install("PI-SN-001", "T-SN-101", None).unwrap();
        assert_eq!(saves.get(), 1);

        ledger
            .add_maintenance_log("PI-SN-001", "borescope".to_string(), None)
            .unwrap();
        assert_eq!(saves.get(), 2);

        ledger.remove("PI-SN-001", None, None, None).unwrap();
        assert_eq!(saves.get(), 3);

        // Queries don't save
        let turbine_id = ledger.document().turbine_by_serial("T-SN-101").unwrap().turbine_id;
        ledger.installed_parts(turbine_id);
        assert_eq!(saves.get(), 3);
    }

    #[test]
    fn test_save_failure_propagates() {
        let (mut store, _) = MemoryStore::new();
        store.fail_saves = true;
        let mut ledger = Ledger::open(store).unwrap();

        let err = ledger
            .add_turbine(NewTurbine {
                serial_number: "T-SN-101".to_string(),
                frame_type: "7FA".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, LedgerError::Store(StoreError::Unwritable { .. })));
    }
}
