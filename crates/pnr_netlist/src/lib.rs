//! Gate-level netlist data model and BLIF-style parser.
//!
//! This crate owns the [`Netlist`] data model (§3 of SPEC_FULL.md: model
//! name, primary I/O, clocks, and `.subckt` cell instances) and the
//! line-oriented BLIF parser described in §6.

#![warn(missing_docs)]

pub mod blif;
pub mod ids;
pub mod model;

pub use blif::parse_blif;
pub use ids::CellId;
pub use model::{CellInstance, NamesGate, Netlist};
