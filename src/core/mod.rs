//! Core module - the document, the store behind it, and the lifecycle ledger

pub mod document;
pub mod ledger;
pub mod store;

pub use document::{next_id, Document};
pub use ledger::{
    Ledger, LedgerError, LifecycleView, NewPartInstance, NewPartMaster, NewTurbine,
};
pub use store::{JsonStore, Store, StoreError};
