//! grnmerge CLI - Combine network predictions from different priors
//!
//! # Main Command
//!
//! ```bash
//! grnmerge combine chrom.tsv trrust.tsv -o combined_network.tsv
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! grnmerge parse network.tsv        # Just parse a table to JSON
//! grnmerge validate network.tsv     # Validate rows against the schema
//! grnmerge ungroup trrust.tsv       # Expand grouped predictors
//! grnmerge example-groups           # Show the example group map
//! ```

use clap::{Parser, Subcommand};
use grnmerge::{
    combine_files, example_group_map, interactions_from_records, parse_table_file_auto,
    validate_network_record, write_network, CombineOptions, GroupMap, Prior,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grnmerge")]
#[command(about = "Combine gene-regulatory network predictions from different priors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two network tables into one merged network
    Combine {
        /// Network inferred with the chromatin-accessibility prior
        network1: PathBuf,

        /// Network inferred with the TRRUST prior
        network2: PathBuf,

        /// Output file
        #[arg(short, long, default_value = "combined_network.tsv")]
        output: PathBuf,

        /// Group map JSON file (default: the published cell-lines map)
        #[arg(long)]
        groups: Option<PathBuf>,

        /// Skip row validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Parse a network table and output JSON
    Parse {
        /// Input table file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expand grouped predictors in one table
    Ungroup {
        /// Input table file
        input: PathBuf,

        /// Group map JSON file (default: the published cell-lines map)
        #[arg(long)]
        groups: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate table rows against the network-record schema
    Validate {
        /// Input table file
        input: PathBuf,
    },

    /// Show the example group map
    ExampleGroups,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Combine {
            network1,
            network2,
            output,
            groups,
            no_validate,
        } => cmd_combine(&network1, &network2, &output, groups, no_validate),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Ungroup {
            input,
            groups,
            output,
        } => cmd_ungroup(&input, groups.as_deref(), output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::ExampleGroups => cmd_example_groups(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_combine(
    network1: &Path,
    network2: &Path,
    output: &Path,
    groups: Option<PathBuf>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Combining: {} + {}", network1.display(), network2.display());

    let options = CombineOptions {
        groups_path: groups,
        skip_validation: no_validate,
    };

    let report = combine_files(network1, network2, &options)?;

    let chrom_only = count_prior(&report, Prior::Chrom);
    let trrust_only = count_prior(&report, Prior::Trrust);

    eprintln!("\n📊 Combined network: {} interactions", report.interactions.len());
    eprintln!("   CHROM only:  {}", chrom_only);
    eprintln!("   TRRUST only: {}", trrust_only);
    eprintln!("   Both priors: {}", report.both_pairs);
    if !report.dropped.is_empty() {
        eprintln!("   Dropped:     {}", report.dropped.len());
    }

    write_network(output, &report.interactions)?;
    eprintln!("💾 Output written to: {}", output.display());

    eprintln!("\n✨ Done!");
    Ok(())
}

fn count_prior(report: &grnmerge::CombineReport, prior: Prior) -> usize {
    report.interactions.iter().filter(|i| i.prior == prior).count()
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing table: {}", input.display());

    let result = parse_table_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'",
        match result.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        }
    );
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} rows", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_ungroup(
    input: &Path,
    groups: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Ungrouping: {}", input.display());

    let map = match groups {
        Some(path) => GroupMap::from_file(path)?,
        None => example_group_map(),
    };

    let parsed = parse_table_file_auto(input)?;
    eprintln!("   {} rows", parsed.records.len());

    let extraction = interactions_from_records(&parsed.records, Prior::Trrust)?;
    if !extraction.skipped.is_empty() {
        eprintln!("   ⚠️  {} incomplete rows skipped", extraction.skipped.len());
    }

    let result = grnmerge::expand_grouped(extraction.interactions, &map);
    eprintln!(
        "   {} grouped rows expanded into {} member rows",
        result.expanded_rows, result.emitted_rows
    );
    for group in &result.unknown_groups {
        eprintln!("   ⚠️  Unknown group dropped: {}", group);
    }

    let json = serde_json::to_string_pretty(&result.interactions)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let parsed = parse_table_file_auto(input)?;

    let mut valid = 0;
    let mut invalid = 0;

    for (i, record) in parsed.records.iter().enumerate() {
        match validate_network_record(record) {
            Ok(()) => valid += 1,
            Err(errors) => {
                invalid += 1;
                if invalid <= 5 {
                    eprintln!("\n❌ Line {} invalid:", i + 2);
                    for err in errors.iter().take(3) {
                        eprintln!("   - {}", err);
                    }
                }
            }
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_example_groups() -> Result<(), Box<dyn std::error::Error>> {
    let map = example_group_map();
    println!("{}", map.to_json()?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
