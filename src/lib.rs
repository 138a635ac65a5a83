//! TPT: Turbine Parts Toolkit
//!
//! A command-line toolkit for tracking turbines and the serialized parts
//! installed in them, backed by a single plain JSON data file.

pub mod cli;
pub mod core;
pub mod entities;
