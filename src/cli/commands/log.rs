//! `tpt log` command - maintenance log management

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, open_ledger, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::MaintenanceLog;

#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// Record maintenance work on a part instance
    Add(AddArgs),

    /// List maintenance log entries
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Serial number of the part instance
    pub part: String,

    /// What was done
    pub description: String,

    /// Date the work was performed (YYYY-MM-DD, defaults to now)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only entries for this part instance serial number
    #[arg(long, short = 'p')]
    pub part: Option<String>,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

/// Run a log subcommand
pub fn run(cmd: LogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        LogCommands::Add(args) => run_add(args, global),
        LogCommands::List(args) => run_list(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let log_date = args
        .date
        .map(|d| d.and_time(NaiveTime::MIN).and_utc());
    let log = ledger
        .add_maintenance_log(&args.part, args.description, log_date)
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Logged maintenance on {} (entry {})",
            style("✓").green(),
            style(&args.part).cyan(),
            log.log_id
        );
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;
    let document = ledger.document();

    let part_filter = match args.part {
        Some(ref serial) => {
            let instance = document
                .instance_by_serial(serial)
                .ok_or_else(|| miette::miette!("no part instance with serial number '{serial}'"))?;
            Some(instance.instance_id)
        }
        None => None,
    };

    let mut logs: Vec<&MaintenanceLog> = document
        .maintenance_logs
        .iter()
        .filter(|l| part_filter.map_or(true, |id| l.instance_id == id))
        .collect();

    if let Some(limit) = args.limit {
        logs.truncate(limit);
    }

    if args.count {
        println!("{}", logs.len());
        return Ok(());
    }
    if logs.is_empty() {
        println!("No maintenance log entries found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&logs).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("log_id,part_serial,log_date,description");
            for l in &logs {
                let serial = document
                    .instance_by_id(l.instance_id)
                    .map(|i| i.serial_number.as_str())
                    .unwrap_or("");
                println!(
                    "{},{},{},{}",
                    l.log_id,
                    escape_csv(serial),
                    l.log_date.format("%Y-%m-%d"),
                    escape_csv(&l.description)
                );
            }
        }
        OutputFormat::Id => {
            for l in &logs {
                println!("{}", l.log_id);
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<5} {:<16} {:<12} {:<40}",
                style("ID").bold().dim(),
                style("PART").bold(),
                style("DATE").bold(),
                style("DESCRIPTION").bold()
            );
            println!("{}", "-".repeat(76));
            for l in &logs {
                let serial = document
                    .instance_by_id(l.instance_id)
                    .map(|i| i.serial_number.as_str())
                    .unwrap_or("?");
                println!(
                    "{:<5} {:<16} {:<12} {:<40}",
                    l.log_id,
                    style(truncate_str(serial, 14)).cyan(),
                    l.log_date.format("%Y-%m-%d"),
                    truncate_str(&l.description, 38)
                );
            }
            println!();
            println!("{} log entr(ies) found.", style(logs.len()).cyan());
        }
    }

    Ok(())
}
