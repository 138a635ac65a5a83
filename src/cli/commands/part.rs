//! `tpt part` command - part type catalog management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, open_ledger, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::NewPartMaster;
use crate::entities::PartMaster;

#[derive(Subcommand, Debug)]
pub enum PartCommands {
    /// List catalog entries with filtering
    List(ListArgs),

    /// Add a part type to the catalog
    Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in part number, description, and manufacturer
    #[arg(long)]
    pub search: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Part number (catalog key)
    pub part_number: String,

    /// Short description (e.g. "Stage 1 nozzle")
    #[arg(long, short = 'D')]
    pub description: String,

    /// Manufacturer name
    #[arg(long, short = 'm', default_value = "")]
    pub manufacturer: String,
}

/// Run a part subcommand
pub fn run(cmd: PartCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PartCommands::List(args) => run_list(args, global),
        PartCommands::Add(args) => run_add(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;

    let mut masters: Vec<&PartMaster> = ledger
        .document()
        .part_masters
        .iter()
        .filter(|m| {
            if let Some(ref search) = args.search {
                let search = search.to_lowercase();
                m.part_number.to_lowercase().contains(&search)
                    || m.description.to_lowercase().contains(&search)
                    || m.manufacturer.to_lowercase().contains(&search)
            } else {
                true
            }
        })
        .collect();

    if let Some(limit) = args.limit {
        masters.truncate(limit);
    }

    if args.count {
        println!("{}", masters.len());
        return Ok(());
    }
    if masters.is_empty() {
        println!("No catalog entries found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&masters).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("part_number,description,manufacturer");
            for m in &masters {
                println!(
                    "{},{},{}",
                    escape_csv(&m.part_number),
                    escape_csv(&m.description),
                    escape_csv(&m.manufacturer)
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<16} {:<34} {:<18}",
                style("PART #").bold(),
                style("DESCRIPTION").bold(),
                style("MANUFACTURER").bold()
            );
            println!("{}", "-".repeat(70));
            for m in &masters {
                println!(
                    "{:<16} {:<34} {:<18}",
                    style(truncate_str(&m.part_number, 14)).cyan(),
                    truncate_str(&m.description, 32),
                    truncate_str(&m.manufacturer, 16)
                );
            }
            println!();
            println!("{} catalog entr(ies) found.", style(masters.len()).cyan());
        }
        OutputFormat::Id => {
            for m in &masters {
                println!("{}", m.part_number);
            }
        }
    }

    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let master = ledger
        .add_part_master(NewPartMaster {
            part_number: args.part_number,
            description: args.description,
            manufacturer: args.manufacturer,
        })
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added part {} to the catalog",
            style("✓").green(),
            style(&master.part_number).cyan()
        );
    }
    Ok(())
}
