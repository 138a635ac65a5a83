//! `tpt turbine` command - fleet management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, open_ledger, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::NewTurbine;
use crate::entities::Turbine;

#[derive(Subcommand, Debug)]
pub enum TurbineCommands {
    /// List turbines with filtering
    List(ListArgs),

    /// Register a new turbine
    Add(AddArgs),

    /// Show a turbine's details and currently installed parts
    Show(ShowArgs),
}

/// List column for display and sorting
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListColumn {
    Id,
    Serial,
    Frame,
    Location,
    Hours,
    Starts,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Search in serial number, frame type, and location
    #[arg(long)]
    pub search: Option<String>,

    /// Sort by column
    #[arg(long, default_value = "id")]
    pub sort: ListColumn,

    /// Reverse sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Turbine serial number
    pub serial: String,

    /// Frame type (e.g. "7FA")
    #[arg(long, short = 'F')]
    pub frame: String,

    /// Site or plant where the unit operates
    #[arg(long, short = 'l', default_value = "")]
    pub location: String,

    /// Cumulative fired hours at registration
    #[arg(long, default_value_t = 0.0)]
    pub hours: f64,

    /// Cumulative start count at registration
    #[arg(long, default_value_t = 0)]
    pub starts: u32,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Turbine serial number
    pub serial: String,
}

/// Run a turbine subcommand
pub fn run(cmd: TurbineCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        TurbineCommands::List(args) => run_list(args, global),
        TurbineCommands::Add(args) => run_add(args, global),
        TurbineCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;

    let mut turbines: Vec<&Turbine> = ledger
        .document()
        .turbines
        .iter()
        .filter(|t| {
            if let Some(ref search) = args.search {
                let search = search.to_lowercase();
                t.serial_number.to_lowercase().contains(&search)
                    || t.frame_type.to_lowercase().contains(&search)
                    || t.location.to_lowercase().contains(&search)
            } else {
                true
            }
        })
        .collect();

    match args.sort {
        ListColumn::Id => turbines.sort_by_key(|t| t.turbine_id),
        ListColumn::Serial => turbines.sort_by(|a, b| a.serial_number.cmp(&b.serial_number)),
        ListColumn::Frame => turbines.sort_by(|a, b| a.frame_type.cmp(&b.frame_type)),
        ListColumn::Location => turbines.sort_by(|a, b| a.location.cmp(&b.location)),
        ListColumn::Hours => turbines.sort_by(|a, b| {
            a.current_total_hours
                .partial_cmp(&b.current_total_hours)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        ListColumn::Starts => turbines.sort_by_key(|t| t.current_total_starts),
    }
    if args.reverse {
        turbines.reverse();
    }
    if let Some(limit) = args.limit {
        turbines.truncate(limit);
    }

    if args.count {
        println!("{}", turbines.len());
        return Ok(());
    }
    if turbines.is_empty() {
        println!("No turbines found.");
        return Ok(());
    }

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&turbines).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("turbine_id,serial_number,frame_type,location,current_total_hours,current_total_starts");
            for t in &turbines {
                println!(
                    "{},{},{},{},{},{}",
                    t.turbine_id,
                    escape_csv(&t.serial_number),
                    escape_csv(&t.frame_type),
                    escape_csv(&t.location),
                    t.current_total_hours,
                    t.current_total_starts
                );
            }
        }
        OutputFormat::Tsv => {
            println!(
                "{:<5} {:<16} {:<12} {:<22} {:>12} {:>8}",
                style("ID").bold().dim(),
                style("SERIAL").bold(),
                style("FRAME").bold(),
                style("LOCATION").bold(),
                style("HOURS").bold(),
                style("STARTS").bold()
            );
            println!("{}", "-".repeat(80));
            for t in &turbines {
                println!(
                    "{:<5} {:<16} {:<12} {:<22} {:>12.1} {:>8}",
                    t.turbine_id,
                    style(truncate_str(&t.serial_number, 14)).cyan(),
                    truncate_str(&t.frame_type, 10),
                    truncate_str(&t.location, 20),
                    t.current_total_hours,
                    t.current_total_starts
                );
            }
            println!();
            println!("{} turbine(s) found.", style(turbines.len()).cyan());
        }
        OutputFormat::Id => {
            for t in &turbines {
                println!("{}", t.serial_number);
            }
        }
    }

    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let turbine = ledger
        .add_turbine(NewTurbine {
            serial_number: args.serial,
            frame_type: args.frame,
            location: args.location,
            hours: args.hours,
            starts: args.starts,
        })
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Added turbine {} (id {})",
            style("✓").green(),
            style(&turbine.serial_number).cyan(),
            turbine.turbine_id
        );
    }
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;

    let turbine = ledger
        .document()
        .turbine_by_serial(&args.serial)
        .ok_or_else(|| miette::miette!("no turbine with serial number '{}'", args.serial))?;

    if global.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(turbine).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", style(&turbine.serial_number).cyan().bold());
    println!("  Frame:    {}", turbine.frame_type);
    if !turbine.location.is_empty() {
        println!("  Location: {}", turbine.location);
    }
    println!("  Hours:    {:.1}", turbine.current_total_hours);
    println!("  Starts:   {}", turbine.current_total_starts);

    let installed = ledger.installed_parts(turbine.turbine_id);
    println!();
    if installed.is_empty() {
        println!("No parts currently installed.");
    } else {
        println!("{}", style("Installed parts:").bold());
        for instance in installed {
            let description = ledger
                .document()
                .master_by_part_number(&instance.part_number)
                .map(|m| m.description.as_str())
                .unwrap_or("(not in catalog)");
            println!(
                "  {} {} - {}",
                style(&instance.serial_number).cyan(),
                instance.part_number,
                description
            );
        }
    }

    Ok(())
}
