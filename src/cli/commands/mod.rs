//! Command implementations

pub mod completions;
pub mod import;
pub mod init;
pub mod install;
pub mod installed;
pub mod instance;
pub mod lifecycle;
pub mod log;
pub mod part;
pub mod remove;
pub mod turbine;
