//! `tpt lifecycle` command - full history of one part instance

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{fmt_opt_count, fmt_opt_hours, open_ledger};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct LifecycleArgs {
    /// Serial number of the part instance
    pub part: String,
}

pub fn run(args: LifecycleArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;
    let document = ledger.document();

    let instance_id = document
        .instance_by_serial(&args.part)
        .ok_or_else(|| miette::miette!("no part instance with serial number '{}'", args.part))?
        .instance_id;

    let view = ledger.lifecycle(instance_id).into_diagnostic()?;

    if global.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&view).into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", style(&view.instance.serial_number).cyan().bold());
    match view.master {
        Some(master) => {
            print!("  Part:     {} - {}", master.part_number, master.description);
            if master.manufacturer.is_empty() {
                println!();
            } else {
                println!(" ({})", master.manufacturer);
            }
        }
        None => println!(
            "  Part:     {} (not in catalog)",
            view.instance.part_number
        ),
    }
    if let Some(date) = view.instance.manufacture_date {
        println!("  Made:     {}", date);
    }
    match document.open_record_for(instance_id) {
        Some(record) => {
            let turbine = document
                .turbine_by_id(record.turbine_id)
                .map(|t| t.serial_number.clone())
                .unwrap_or_else(|| format!("turbine {}", record.turbine_id));
            println!("  Status:   installed in {}", style(turbine).green());
        }
        None => println!("  Status:   {}", style("spare").dim()),
    }

    println!();
    if view.installations.is_empty() {
        println!("No installation history.");
    } else {
        println!("{}", style("Installation history:").bold());
        println!(
            "  {:<16} {:<12} {:<12} {:>10} {:>8}",
            style("TURBINE").bold(),
            style("INSTALLED").bold(),
            style("REMOVED").bold(),
            style("HOURS").bold(),
            style("STARTS").bold()
        );
        for record in &view.installations {
            let turbine = document
                .turbine_by_id(record.turbine_id)
                .map(|t| t.serial_number.clone())
                .unwrap_or_else(|| format!("#{}", record.turbine_id));
            let removed = match record.removal_date {
                Some(date) => date.to_string(),
                None => "(installed)".to_string(),
            };
            println!(
                "  {:<16} {:<12} {:<12} {:>10} {:>8}",
                style(turbine).cyan(),
                record.installation_date,
                removed,
                fmt_opt_hours(record.hours_in_service()),
                fmt_opt_count(record.turbine_starts_at_removal)
            );
        }
    }

    println!();
    if view.maintenance.is_empty() {
        println!("No maintenance log entries.");
    } else {
        println!("{}", style("Maintenance log:").bold());
        for log in &view.maintenance {
            println!(
                "  {} {}",
                style(log.log_date.format("%Y-%m-%d")).dim(),
                log.description
            );
        }
    }

    Ok(())
}
