//! High-level combine pipeline.
//!
//! Combines two network prediction tables end to end: parse both with
//! auto-detection, validate rows, extract typed interactions, expand the
//! TRRUST table's grouped predictors, concatenate, reconcile overlapping
//! pairs, and write the merged table.
//!
//! # Example
//!
//! ```rust,ignore
//! use grnmerge::{combine_files, write_network, CombineOptions};
//! use std::path::Path;
//!
//! let report = combine_files(
//!     Path::new("network_ChromPrior.tsv"),
//!     Path::new("network_TrrustPrior.tsv"),
//!     &CombineOptions::default(),
//! )?;
//! write_network(Path::new("combined_network.tsv"), &report.interactions)?;
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult, ValidationError};
use crate::logs::{log_info, log_success, log_warning};
use crate::models::{
    format_score, interactions_from_records, Interaction, Prior, SkippedRow,
    OUTPUT_SCORE_COL, REGULATOR_COL, TARGET_COL,
};
use crate::parser::{parse_table_file_auto, ParseResult};
use crate::validation::validate_network_record;

use super::groups::{example_group_map, GroupMap};
use super::reconcile::{reconcile, DroppedPair};
use super::ungroup::expand_grouped;

/// Abort the combine when a table has more failing rows than this.
const MAX_INVALID_ROWS: usize = 25;

/// Options for the combine pipeline
#[derive(Debug, Clone, Default)]
pub struct CombineOptions {
    /// Group map JSON file; the published cell-lines map when absent.
    pub groups_path: Option<PathBuf>,

    /// Skip row schema validation
    pub skip_validation: bool,
}

/// Parsing and validation info for one input table
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub encoding: String,
    pub delimiter: char,
    pub rows: usize,
    pub invalid_rows: usize,
    pub skipped_rows: usize,
}

/// Result of a complete combine run
#[derive(Debug, Serialize)]
pub struct CombineReport {
    /// Merged interactions, sorted by (regulator, target)
    pub interactions: Vec<Interaction>,

    /// CHROM input table info
    pub chrom: TableInfo,

    /// TRRUST input table info
    pub trrust: TableInfo,

    /// Grouped rows expanded in the TRRUST table
    pub expanded_rows: usize,

    /// Group ids that were not in the map (their rows were dropped)
    pub unknown_groups: Vec<String>,

    /// Pairs merged from both priors
    pub both_pairs: usize,

    /// Duplicated pairs dropped for lack of a TRRUST row
    pub dropped: Vec<DroppedPair>,
}

/// Combine two network table files.
///
/// This is the main entry point for the pipeline. It:
/// 1. Parses both tables with encoding/delimiter auto-detection
/// 2. Validates rows against the network-record schema
/// 3. Extracts typed interactions tagged CHROM / TRRUST
/// 4. Expands grouped predictors in the TRRUST table
/// 5. Reconciles overlapping pairs (sign from TRRUST, max magnitude)
pub fn combine_files(
    chrom_path: &Path,
    trrust_path: &Path,
    options: &CombineOptions,
) -> PipelineResult<CombineReport> {
    let chrom = read_table(chrom_path, Prior::Chrom)?;
    let trrust = read_table(trrust_path, Prior::Trrust)?;

    let map = match &options.groups_path {
        Some(path) => {
            log_info(format!("Using group map: {}", path.display()));
            GroupMap::from_file(path)?
        }
        None => example_group_map(),
    };

    combine_parsed(chrom, trrust, &map, options.skip_validation)
}

/// Combine two already-parsed tables.
///
/// Library/test entry point; [`combine_files`] is a thin wrapper over this.
pub fn combine_parsed(
    chrom: ParseResult,
    trrust: ParseResult,
    map: &GroupMap,
    skip_validation: bool,
) -> PipelineResult<CombineReport> {
    for (parsed, prior) in [(&chrom, Prior::Chrom), (&trrust, Prior::Trrust)] {
        if parsed.records.is_empty() {
            return Err(PipelineError::EmptyInput(prior.as_label().to_string()));
        }
    }

    let chrom_invalid = check_records(&chrom.records, Prior::Chrom, skip_validation)?;
    let trrust_invalid = check_records(&trrust.records, Prior::Trrust, skip_validation)?;

    log_info("⚙️  Extracting typed interactions...");
    let chrom_extract = interactions_from_records(&chrom.records, Prior::Chrom)?;
    report_skips(Prior::Chrom, &chrom_extract.skipped);
    let trrust_extract = interactions_from_records(&trrust.records, Prior::Trrust)?;
    report_skips(Prior::Trrust, &trrust_extract.skipped);

    log_info("📦 Expanding grouped predictors...");
    let ungrouped = expand_grouped(trrust_extract.interactions, map);
    if ungrouped.expanded_rows > 0 {
        log_success(format!(
            "{} grouped rows expanded into {} member rows",
            ungrouped.expanded_rows, ungrouped.emitted_rows
        ));
    } else {
        log_info("No grouped predictors found");
    }
    for group in &ungrouped.unknown_groups {
        log_warning(format!("Unknown group '{}' dropped (not in map)", group));
    }

    log_info("🔀 Reconciling overlapping pairs...");
    let mut all = chrom_extract.interactions;
    all.extend(ungrouped.interactions);
    let reconciled = reconcile(all, Prior::Trrust);

    log_success(format!(
        "{} pairs in combined network ({} predicted by both priors)",
        reconciled.interactions.len(),
        reconciled.both_pairs
    ));
    if !reconciled.dropped.is_empty() {
        log_warning(format!(
            "{} duplicated pairs dropped (no TRRUST row to take the sign from)",
            reconciled.dropped.len()
        ));
    }
    if reconciled.interactions.is_empty() {
        log_warning("Combined network is empty");
    }

    Ok(CombineReport {
        interactions: reconciled.interactions,
        chrom: TableInfo {
            encoding: chrom.encoding,
            delimiter: chrom.delimiter,
            rows: chrom.records.len(),
            invalid_rows: chrom_invalid,
            skipped_rows: chrom_extract.skipped.len(),
        },
        trrust: TableInfo {
            encoding: trrust.encoding,
            delimiter: trrust.delimiter,
            rows: trrust.records.len(),
            invalid_rows: trrust_invalid,
            skipped_rows: trrust_extract.skipped.len(),
        },
        expanded_rows: ungrouped.expanded_rows,
        unknown_groups: ungrouped.unknown_groups,
        both_pairs: reconciled.both_pairs,
        dropped: reconciled.dropped,
    })
}

/// Write the combined network as a tab-separated table.
///
/// Columns: `regulator`, `target`, `bootstraps` (the reconciled score).
pub fn write_network(path: &Path, interactions: &[Interaction]) -> PipelineResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;

    writer.write_record([REGULATOR_COL, TARGET_COL, OUTPUT_SCORE_COL])?;
    for interaction in interactions {
        writer.write_record([
            interaction.regulator.as_str(),
            interaction.target.as_str(),
            format_score(interaction.score).as_str(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

fn read_table(path: &Path, prior: Prior) -> PipelineResult<ParseResult> {
    log_info(format!("📖 Reading {} network: {}", prior, path.display()));
    let parsed = parse_table_file_auto(path)?;
    log_success(format!(
        "Encoding: {}, separator: '{}', {} rows",
        parsed.encoding,
        format_delimiter(parsed.delimiter),
        parsed.records.len()
    ));
    Ok(parsed)
}

/// Format delimiter for display
fn format_delimiter(d: char) -> &'static str {
    match d {
        '\t' => "TAB",
        ',' => ",",
        ';' => ";",
        '|' => "|",
        _ => "?",
    }
}

/// Validate rows against the network-record schema.
///
/// Returns the number of failing rows; aborts past [`MAX_INVALID_ROWS`].
fn check_records(records: &[serde_json::Value], prior: Prior, skip: bool) -> PipelineResult<usize> {
    if skip {
        log_info(format!("({} validation skipped)", prior));
        return Ok(0);
    }

    log_info(format!("✔️  Validating {} {} rows...", records.len(), prior));

    let mut invalid = 0;
    let mut samples = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        if let Err(errors) = validate_network_record(record) {
            invalid += 1;
            if samples.len() < 5 {
                samples.push(format!("line {}: {}", idx + 2, errors.join(", ")));
            }
        }
    }

    if invalid > MAX_INVALID_ROWS {
        return Err(ValidationError::TooManyInvalid {
            invalid,
            total: records.len(),
            samples,
        }
        .into());
    }

    if invalid > 0 {
        log_warning(format!("{} rows failed validation:", invalid));
        for sample in &samples {
            log_warning(format!("• {}", sample));
        }
    } else {
        log_success(format!("All {} rows valid", records.len()));
    }

    Ok(invalid)
}

fn report_skips(prior: Prior, skipped: &[SkippedRow]) {
    if skipped.is_empty() {
        return;
    }
    log_warning(format!("{} {} rows skipped:", skipped.len(), prior));
    for skip in skipped.iter().take(5) {
        log_warning(format!("• line {}: {}", skip.line, skip.reason));
    }
    if skipped.len() > 5 {
        log_warning(format!("• ... +{}", skipped.len() - 5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(records: Vec<serde_json::Value>) -> ParseResult {
        ParseResult {
            records,
            encoding: "utf-8".to_string(),
            delimiter: '\t',
            headers: vec![
                REGULATOR_COL.to_string(),
                TARGET_COL.to_string(),
                "beta.sign.sum".to_string(),
            ],
        }
    }

    fn row(regulator: &str, target: &str, score: &str) -> serde_json::Value {
        json!({ "regulator": regulator, "target": target, "beta.sign.sum": score })
    }

    #[test]
    fn test_combine_parsed_end_to_end() {
        let chrom = parsed(vec![
            row("ATF1", "MYC", "12.0"),
            row("JUN", "FOS", "-12.0"),
        ]);
        let trrust = parsed(vec![
            row("JUN", "FOS", "5.0"),
            row("pred.group.1", "HLA-DRA", "7.0"),
            row("E2F1", "CCNE1", "4.0"),
        ]);

        let report =
            combine_parsed(chrom, trrust, &example_group_map(), false).unwrap();

        let rows: Vec<_> = report
            .interactions
            .iter()
            .map(|i| (i.regulator.as_str(), i.target.as_str(), i.score, i.prior))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("ATF1", "MYC", 12.0, Prior::Chrom),
                ("E2F1", "CCNE1", 4.0, Prior::Trrust),
                // Sign from TRRUST (+5.0), magnitude from CHROM (12.0)
                ("JUN", "FOS", 12.0, Prior::Both),
                ("RFXANK", "HLA-DRA", 7.0, Prior::Trrust),
                ("RFXAP", "HLA-DRA", 7.0, Prior::Trrust),
            ]
        );
        assert_eq!(report.both_pairs, 1);
        assert_eq!(report.expanded_rows, 1);
        assert!(report.dropped.is_empty());
        assert_eq!(report.chrom.rows, 2);
        assert_eq!(report.trrust.rows, 3);
    }

    #[test]
    fn test_combine_parsed_empty_input() {
        let chrom = parsed(vec![]);
        let trrust = parsed(vec![row("JUN", "FOS", "5.0")]);

        let err = combine_parsed(chrom, trrust, &example_group_map(), false).unwrap_err();
        assert!(err.to_string().contains("CHROM"));
    }

    #[test]
    fn test_combine_parsed_aborts_on_garbage_table() {
        let bad_rows = (0..30).map(|_| row("", "FOS", "x")).collect();
        let chrom = parsed(bad_rows);
        let trrust = parsed(vec![row("JUN", "FOS", "5.0")]);

        let err = combine_parsed(chrom, trrust, &example_group_map(), false).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::TooManyInvalid { invalid: 30, .. })
        ));
    }

    #[test]
    fn test_invalid_rows_below_cap_are_skipped() {
        let chrom = parsed(vec![
            row("ATF1", "MYC", "12.0"),
            row("", "FOS", "1.0"),
        ]);
        let trrust = parsed(vec![row("JUN", "FOS", "5.0")]);

        let report =
            combine_parsed(chrom, trrust, &example_group_map(), false).unwrap();
        assert_eq!(report.chrom.invalid_rows, 1);
        assert_eq!(report.chrom.skipped_rows, 1);
        assert_eq!(report.interactions.len(), 2);
    }

    #[test]
    fn test_combine_files_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let chrom_path = dir.path().join("chrom.tsv");
        std::fs::write(
            &chrom_path,
            "regulator\ttarget\tbeta.sign.sum\nJUN\tFOS\t-12.0\nATF1\tMYC\t3.5\n",
        )
        .unwrap();

        let trrust_path = dir.path().join("trrust.tsv");
        std::fs::write(
            &trrust_path,
            "regulator\ttarget\tbeta.sign.sum\nJUN\tFOS\t5.0\npred.group.1\tCD74\t-7.0\n",
        )
        .unwrap();

        let report = combine_files(
            &chrom_path,
            &trrust_path,
            &CombineOptions::default(),
        )
        .unwrap();

        let out_path = dir.path().join("combined.tsv");
        write_network(&out_path, &report.interactions).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "regulator\ttarget\tbootstraps");
        assert_eq!(lines[1], "ATF1\tMYC\t3.5");
        assert_eq!(lines[2], "JUN\tFOS\t12.0");
        assert_eq!(lines[3], "RFXANK\tCD74\t-7.0");
        assert_eq!(lines[4], "RFXAP\tCD74\t-7.0");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_write_network_empty_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("combined.tsv");
        write_network(&out_path, &[]).unwrap();

        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written.trim_end(), "regulator\ttarget\tbootstraps");
    }
}
