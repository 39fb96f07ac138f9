//! Error types for the grnmerge combine pipeline.
//!
//! One error enum per layer:
//!
//! - [`crate::parser::TableError`] - table parsing errors (with line context)
//! - [`ExtractError`] - typed extraction errors
//! - [`GroupMapError`] - grouped-predictor map errors
//! - [`ValidationError`] - schema validation errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

use crate::parser::TableError;

// =============================================================================
// Extraction Errors
// =============================================================================

/// Errors while turning parsed table rows into typed interactions.
///
/// Row-level problems (empty gene name, unparseable score) are not errors:
/// those rows are skipped and reported. A missing column means the file is
/// not a network table at all, which is fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Required column absent from the table.
    #[error("Missing column '{0}' in network table")]
    MissingColumn(String),
}

// =============================================================================
// Group Map Errors
// =============================================================================

/// Errors loading or checking a grouped-predictor map.
#[derive(Debug, Error)]
pub enum GroupMapError {
    /// Failed to read the map file.
    #[error("Failed to read group map: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("Invalid group map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid group definition.
    #[error("Invalid group '{group}': {message}")]
    InvalidGroup { group: String, message: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors during network-row schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Too many rows failed validation to keep going.
    #[error("{invalid} of {total} rows failed schema validation")]
    TooManyInvalid {
        invalid: usize,
        total: usize,
        /// First few failing rows, for diagnostics.
        samples: Vec<String>,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level combine orchestration errors.
///
/// This is the main error type returned by [`crate::merge::pipeline::combine_files`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table parsing error.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Typed extraction error.
    #[error("Extract error: {0}")]
    Extract(#[from] ExtractError),

    /// Group map error.
    #[error("Group map error: {0}")]
    GroupMap(#[from] GroupMapError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output writer error.
    #[error("Output error: {0}")]
    Csv(#[from] csv::Error),

    /// A network table contained no data rows.
    #[error("Network table '{0}' has no rows")]
    EmptyInput(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type for group map operations.
pub type GroupMapResult<T> = Result<T, GroupMapError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
