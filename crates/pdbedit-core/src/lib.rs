//! # PDB Edit Core Library
//!
//! Tools for rewriting fixed-column PDB structure files as they come out of
//! molecular-simulation setup pipelines: renumbering atoms and molecules,
//! backfilling the element column, validating water ordering, and preparing
//! QM/MM index files for CP2K-style inputs.
//!
//! ## Architecture
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ColumnLayout`,
//!   `AtomRecord`, `ElementTable`), fixed-column slicing, the output record
//!   template, and the lookup-table reader.
//!
//! - **[`engine`]: The Logic Core.** The validated `EditConfig`, the error
//!   taxonomy, advisory diagnostics and the single-pass `PdbRewriter` with its
//!   water and QM/MM collaborators.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that load
//!   inputs, run the engine and write every output file.

pub mod core;
pub mod engine;
pub mod workflows;
