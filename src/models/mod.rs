//! Domain models for the grnmerge combine pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Prior`] - the data source that produced a prediction (CHROM, TRRUST, BOTH)
//! - [`Interaction`] - one predicted regulator → target edge with a signed score
//! - [`PairKey`] - (regulator, target) grouping key
//! - [`interactions_from_records`] - typed extraction from parsed table rows

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExtractError, ExtractResult};

// =============================================================================
// Column Names
// =============================================================================

/// Regulator column in input and output tables.
pub const REGULATOR_COL: &str = "regulator";

/// Target column in input and output tables.
pub const TARGET_COL: &str = "target";

/// Signed score column in input tables (sum of signed betas over bootstraps).
pub const SCORE_COL: &str = "beta.sign.sum";

/// Score column name in the combined output table.
pub const OUTPUT_SCORE_COL: &str = "bootstraps";

// =============================================================================
// Prior
// =============================================================================

/// The prior that seeded the inference run a prediction came from.
///
/// `Both` only appears on reconciled output rows, never on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prior {
    /// Chromatin-accessibility prior.
    Chrom,
    /// TRRUST literature-database prior.
    Trrust,
    /// Predicted under both priors and reconciled.
    Both,
}

impl Prior {
    /// Parse a prior from its table label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "CHROM" => Some(Self::Chrom),
            "TRRUST" => Some(Self::Trrust),
            "BOTH" => Some(Self::Both),
            _ => None,
        }
    }

    /// Label used in table output and logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Chrom => "CHROM",
            Self::Trrust => "TRRUST",
            Self::Both => "BOTH",
        }
    }
}

impl std::fmt::Display for Prior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

// =============================================================================
// Pair Key
// =============================================================================

/// Ordered (regulator, target) key for grouping and sorting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub regulator: String,
    pub target: String,
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.regulator, self.target)
    }
}

// =============================================================================
// Interaction
// =============================================================================

/// One predicted regulator → target interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Regulator gene name (or a `pred.group.N` placeholder before ungrouping).
    pub regulator: String,
    /// Target gene name.
    pub target: String,
    /// Signed confidence score (`beta.sign.sum`).
    pub score: f64,
    /// Prior that produced the prediction.
    pub prior: Prior,
}

impl Interaction {
    pub fn new(
        regulator: impl Into<String>,
        target: impl Into<String>,
        score: f64,
        prior: Prior,
    ) -> Self {
        Self {
            regulator: regulator.into(),
            target: target.into(),
            score,
            prior,
        }
    }

    /// Grouping key for reconciliation.
    pub fn key(&self) -> PairKey {
        PairKey {
            regulator: self.regulator.clone(),
            target: self.target.clone(),
        }
    }
}

// =============================================================================
// Typed Extraction
// =============================================================================

/// A row that could not be turned into an [`Interaction`].
#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    pub reason: String,
}

/// Result of extracting typed interactions from parsed rows.
#[derive(Debug)]
pub struct Extraction {
    pub interactions: Vec<Interaction>,
    pub skipped: Vec<SkippedRow>,
}

/// Convert parsed table rows into typed interactions tagged with a prior.
///
/// Rows with an empty gene name or an empty/unparseable score are skipped
/// and reported, matching how incomplete predictions are dropped from the
/// combined table. A missing column is fatal: the file is not a network
/// table.
pub fn interactions_from_records(records: &[Value], prior: Prior) -> ExtractResult<Extraction> {
    if let Some(first) = records.first() {
        for col in [REGULATOR_COL, TARGET_COL, SCORE_COL] {
            if first.get(col).is_none() {
                return Err(ExtractError::MissingColumn(col.to_string()));
            }
        }
    }

    let mut interactions = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        // +1 for 0-index, +1 for the header line
        let line = idx + 2;

        let regulator = record.get(REGULATOR_COL).and_then(|v| v.as_str()).unwrap_or("");
        let target = record.get(TARGET_COL).and_then(|v| v.as_str()).unwrap_or("");
        let raw_score = record.get(SCORE_COL).and_then(|v| v.as_str()).unwrap_or("");

        if regulator.is_empty() {
            skipped.push(SkippedRow { line, reason: "empty regulator".into() });
            continue;
        }
        if target.is_empty() {
            skipped.push(SkippedRow { line, reason: "empty target".into() });
            continue;
        }
        if raw_score.is_empty() {
            skipped.push(SkippedRow { line, reason: "empty score".into() });
            continue;
        }

        let score = match raw_score.parse::<f64>() {
            Ok(s) if s.is_finite() => s,
            _ => {
                skipped.push(SkippedRow {
                    line,
                    reason: format!("score '{}' is not a finite number", raw_score),
                });
                continue;
            }
        };

        interactions.push(Interaction::new(regulator, target, score, prior));
    }

    Ok(Extraction { interactions, skipped })
}

// =============================================================================
// Score Formatting
// =============================================================================

/// Render a reconciled score for the output table.
///
/// Integral values keep one decimal (`-50.0`), matching how the published
/// combined tables print float scores; fractional values use the shortest
/// round-trip form.
pub fn format_score(score: f64) -> String {
    if score == score.trunc() {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

// =============================================================================
// Tests
// =============================================================================
