//! Input/output for fixed-column PDB files and their companion tables.
//!
//! - [`pdb`] slices and classifies PDB lines and writes rewritten documents.
//! - [`template`] parses and renders the output record format.
//! - [`lookup`] reads two-column lookup tables (renumbering maps, element tables).
//! - [`files`] holds line-oriented write helpers and output-path derivation.

pub mod files;
pub mod lookup;
pub mod pdb;
pub mod template;
