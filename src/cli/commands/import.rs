//! `tpt import` command - bulk part-instance registration from CSV
//!
//! Each row goes through the same registration path as `tpt instance add`,
//! so uniqueness checks and save-per-mutation semantics are identical. Bad
//! rows are reported and skipped; the rest of the file still imports.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use console::style;
use csv::StringRecord;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_ledger;
use crate::cli::GlobalOpts;
use crate::core::NewPartInstance;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// CSV file with part_number and serial_number columns
    /// (manufacture_date is optional; unknown columns are ignored)
    pub file: PathBuf,

    /// Validate the file without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Build a map from header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a field value from a CSV record
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let mut reader = csv::Reader::from_path(&args.file)
        .map_err(|e| miette::miette!("cannot read {}: {e}", args.file.display()))?;

    let header_map = build_header_map(reader.headers().into_diagnostic()?);
    for required in ["part_number", "serial_number"] {
        if !header_map.contains_key(required) {
            return Err(miette::miette!(
                "{} is missing the required column '{required}'",
                args.file.display()
            ));
        }
    }

    let mut ledger = open_ledger(global).into_diagnostic()?;
    let mut added = 0usize;
    let mut failed = 0usize;
    // Serials accepted earlier in this same file (dry runs never touch the
    // document, so in-file duplicates need their own check)
    let mut seen = std::collections::HashSet::new();

    for (index, row) in reader.records().enumerate() {
        // Header is line 1, first data row is line 2
        let line = index + 2;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                eprintln!("{} line {line}: {e}", style("✗").red());
                failed += 1;
                continue;
            }
        };

        let (part_number, serial_number) = match (
            get_field(&row, &header_map, "part_number"),
            get_field(&row, &header_map, "serial_number"),
        ) {
            (Some(part_number), Some(serial_number)) => (part_number, serial_number),
            _ => {
                eprintln!(
                    "{} line {line}: missing part_number or serial_number",
                    style("✗").red()
                );
                failed += 1;
                continue;
            }
        };

        let manufacture_date = match get_field(&row, &header_map, "manufacture_date") {
            Some(raw) => match raw.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(_) => {
                    eprintln!(
                        "{} line {line}: '{raw}' is not a date (expected YYYY-MM-DD)",
                        style("✗").red()
                    );
                    failed += 1;
                    continue;
                }
            },
            None => None,
        };

        if args.dry_run {
            if ledger.document().instance_by_serial(&serial_number).is_some()
                || !seen.insert(serial_number.clone())
            {
                eprintln!(
                    "{} line {line}: a part instance with serial number '{serial_number}' already exists",
                    style("✗").red()
                );
                failed += 1;
            } else {
                added += 1;
            }
            continue;
        }

        match ledger.add_part_instance(NewPartInstance {
            part_number,
            serial_number,
            manufacture_date,
        }) {
            Ok(_) => added += 1,
            Err(e) => {
                eprintln!("{} line {line}: {e}", style("✗").red());
                failed += 1;
            }
        }
    }

    if !global.quiet {
        let verb = if args.dry_run { "would import" } else { "imported" };
        println!(
            "{} {verb} {} part instance(s), {} failed",
            style("✓").green(),
            style(added).cyan(),
            if failed > 0 {
                style(failed).red()
            } else {
                style(failed).dim()
            }
        );
    }

    if added == 0 && failed > 0 {
        return Err(miette::miette!("no rows imported from {}", args.file.display()));
    }
    Ok(())
}
