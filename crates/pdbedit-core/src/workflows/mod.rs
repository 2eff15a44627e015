//! # Workflows Module
//!
//! End-to-end entry points: each loads its inputs, runs one transformation and
//! writes its result files.
//!
//! - **PDB rewrite** ([`edit`]) - Renumbering, element backfill, water checks
//!   and QM/MM index files for a single PDB file.
//! - **Line amendment** ([`amend`]) - Adds a prefix and/or suffix to every line
//!   of a text file.
//! - **Dictionary insertion** ([`spell`]) - Adds a word to a Hunspell-style
//!   dictionary, keeping a backup of the original.

pub mod amend;
pub mod edit;
pub mod spell;
