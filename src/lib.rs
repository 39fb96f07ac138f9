//! # grnmerge - combine network predictions from different priors
//!
//! grnmerge merges gene-regulatory network tables produced by inference
//! runs seeded with different priors (chromatin accessibility vs. the
//! TRRUST literature database) into one combined network, reconciling
//! interactions predicted by both.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Two TSVs   │────▶│   Parser    │────▶│    Merge    │────▶│ Combined TSV│
//! │ (per prior) │     │  (auto-enc) │     │ (ungroup +  │     │ (bootstraps)│
//! └─────────────┘     └─────────────┘     │  reconcile) │     └─────────────┘
//!                                         └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grnmerge::{combine_files, write_network, CombineOptions};
//! use std::path::Path;
//!
//! let report = combine_files(
//!     Path::new("network_ChromPrior.tsv"),
//!     Path::new("network_TrrustPrior.tsv"),
//!     &CombineOptions::default(),
//! ).unwrap();
//! write_network(Path::new("combined_network.tsv"), &report.interactions).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Interaction, Prior, PairKey)
//! - [`parser`] - Table parsing with auto-detection
//! - [`merge`] - Ungrouping, reconciliation, and pipeline
//! - [`validation`] - Network-row schema validation
//! - [`logs`] - Stage logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Merging
pub mod merge;

// Validation
pub mod validation;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExtractError,
    GroupMapError,
    PipelineError,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    format_score,
    interactions_from_records,
    Extraction,
    Interaction,
    PairKey,
    Prior,
    SkippedRow,
    OUTPUT_SCORE_COL,
    REGULATOR_COL,
    SCORE_COL,
    TARGET_COL,
};

// =============================================================================
// Re-exports - Table Parsing
// =============================================================================

pub use parser::{
    detect_delimiter,
    detect_encoding,
    decode_content,
    parse_table_bytes_auto,
    parse_table_file_auto,
    table_to_json,
    ParseResult,
    TableError,
};

// =============================================================================
// Re-exports - Merge
// =============================================================================

pub use merge::groups::{example_group_map, is_group_id, GroupMap};
pub use merge::reconcile::{reconcile, DroppedPair, ReconcileResult};
pub use merge::ungroup::{expand_grouped, UngroupResult};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    is_valid,
    is_valid_network_record,
    validate,
    validate_network_record,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use merge::pipeline::{
    combine_files,
    combine_parsed,
    write_network,
    CombineOptions,
    CombineReport,
    TableInfo,
};
