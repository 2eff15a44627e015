//! # Engine Module
//!
//! The stateful layer that rewrites a PDB file in a single forward pass.
//!
//! - [`config`] - The validated `EditConfig` and its builder
//! - [`rewrite`] - `PdbRewriter`, the line-by-line rewrite engine
//! - [`water`] - Water-triplet ordering checks
//! - [`qmmm`] - QM/MM residue selection and its CP2K-style outputs
//! - [`diagnostics`] - Non-fatal advisories and per-run deduplication
//! - [`error`] - The engine error taxonomy
//! - [`progress`] - Phase and file-written events for front ends

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod progress;
pub mod qmmm;
pub mod rewrite;
pub mod water;
