//! Core module for summarizing fusions of interest per biospecimen
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This module contains the functions to turn the curated fusion
//! table of a cohort into subtype-specific specimen x fusion matrices.
//!
//! In short, curated fusion events are filtered by a subtype panel
//! [exact fusion names OR partner genes], counted per specimen and
//! joined against every specimen the raw callers assayed, so that a
//! specimen with no hits is reported as zeros instead of being lost.
//! Every fusion of the panel is reported as a column, even with zero
//! hits across the cohort.

use thiserror::Error;

pub mod cli;
pub mod core;
pub mod utils;

pub use crate::core::filter::{filter, FusionPair, FusionSelector};
pub use crate::core::matrix::{build, OrphanPolicy, Reconciliation, SummaryMatrix};
pub use crate::core::universe::SpecimenUniverse;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(
        "{count} specimen(s) with filtered fusions are absent from the caller tables [{preview}]; \
         rerun with --drop-orphans to discard them"
    )]
    OrphanSpecimens { count: usize, preview: String },
}

pub fn lib_fusion_summary(args: Vec<String>) -> anyhow::Result<()> {
    let args = cli::Args::from(args);
    crate::core::summarize_fusions(args)
}
