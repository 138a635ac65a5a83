//! `tpt instance` command - serialized part instance management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, fmt_opt_date, open_ledger, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::NewPartInstance;
use crate::entities::PartInstance;

#[derive(Subcommand, Debug)]
pub enum InstanceCommands {
    /// List part instances with filtering
    List(ListArgs),

    /// Register a new serialized part instance
    Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by part number
    #[arg(long, short = 'p')]
    pub part: Option<String>,

    /// Show only instances currently installed in a turbine
    #[arg(long, conflicts_with = "spare")]
    pub installed: bool,

    /// Show only instances not currently installed anywhere
    #[arg(long)]
    pub spare: bool,

    /// Search in serial number and part number
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
    /// Serial number stamped on the unit
    pub serial: String,

    /// Part number of the catalog entry this unit was made to
    #[arg(long, short = 'p')]
    pub part: String,

    /// Date of manufacture (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Run an instance subcommand
pub fn run(cmd: InstanceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        InstanceCommands::List(args) => run_list(args, global),
        InstanceCommands::Add(args) => run_add(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;
    let document = ledger.document();

    // Where each instance currently sits, by turbine serial ("spare" rows
    // have no open record).
    let location_of = |instance: &PartInstance| -> Option<String> {
        document
            .open_record_for(instance.instance_id)
            .and_then(|r| document.turbine_by_id(r.turbine_id))
            .map(|t| t.serial_number.clone())
    };

    let mut instances: Vec<&PartInstance> = document
        .part_instances
        .iter()
        .filter(|i| {
            if let Some(ref part) = args.part {
                i.part_number == *part
            } else {
                true
            }
        })
        .filter(|i| {
            if args.installed {
                document.open_record_for(i.instance_id).is_some()
            } else if args.spare {
                document.open_record_for(i.instance_id).is_none()
            } else {
                true
            }
        })
        .filter(|i| {
            if let Some(ref search) = args.search {
                let search = search.to_lowercase();
                i.serial_number.to_lowercase().contains(&search)
                    || i.part_number.to_lowercase().contains(&search)
            } else {
                true
            }
        })
        .collect();

    if let Some(limit) = args.limit {
        instances.truncate(limit);
    }

    if args.count {
        println!("{}", instances.len());
        return Ok(());
    }
    if instances.is_empty() {
        println!("No part instances found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&instances).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("instance_id,serial_number,part_number,manufacture_date,installed_in");
            for i in &instances {
                println!(
                    "{},{},{},{},{}",
                    i.instance_id,
                    escape_csv(&i.serial_number),
                    escape_csv(&i.part_number),
                    fmt_opt_date(i.manufacture_date),
                    location_of(i).unwrap_or_default()
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<5} {:<16} {:<16} {:<12} {:<16}",
                style("ID").bold().dim(),
                style("SERIAL").bold(),
                style("PART #").bold(),
                style("MFG DATE").bold(),
                style("INSTALLED IN").bold()
            );
            println!("{}", "-".repeat(70));
            for i in &instances {
                let location = match location_of(i) {
                    Some(serial) => style(serial).green(),
                    None => style("spare".to_string()).dim(),
                };
                println!(
                    "{:<5} {:<16} {:<16} {:<12} {:<16}",
                    i.instance_id,
                    style(truncate_str(&i.serial_number, 14)).cyan(),
                    truncate_str(&i.part_number, 14),
                    fmt_opt_date(i.manufacture_date),
                    location
                );
            }
            println!();
            println!("{} part instance(s) found.", style(instances.len()).cyan());
        }
        OutputFormat::Id => {
            for i in &instances {
                println!("{}", i.serial_number);
            }
        }
    }

    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let instance = ledger
        .add_part_instance(NewPartInstance {
            part_number: args.part,
            serial_number: args.serial,
            manufacture_date: args.date,
        })
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added part instance {} (id {})",
            style("✓").green(),
            style(&instance.serial_number).cyan(),
            instance.instance_id
        );
        if ledger
            .document()
            .master_by_part_number(&instance.part_number)
            .is_none()
        {
            println!(
                "{} part number {} is not in the catalog yet",
                style("!").yellow(),
                instance.part_number
            );
        }
    }
    Ok(())
}
