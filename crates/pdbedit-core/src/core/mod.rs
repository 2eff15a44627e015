//! # Core Module
//!
//! Fundamental building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Column layout, atom records and the element table
//! - **File I/O** ([`io`]) - PDB line slicing, record templates, lookup tables and
//!   line-oriented output helpers
//! - **Identifiers** ([`utils`]) - Fixed atom-label sets used by the water check and
//!   the QM/MM selection

pub mod io;
pub mod models;
pub mod utils;
