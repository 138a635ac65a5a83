//! `tpt installed` command - what is in a turbine right now

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{escape_csv, fmt_opt_date, open_ledger, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct InstalledArgs {
    /// Turbine serial number
    pub turbine: String,
}

pub fn run(args: InstalledArgs, global: &GlobalOpts) -> Result<()> {
    let ledger = open_ledger(global).into_diagnostic()?;
    let document = ledger.document();

    let turbine = document
        .turbine_by_serial(&args.turbine)
        .ok_or_else(|| miette::miette!("no turbine with serial number '{}'", args.turbine))?;

    let installed = ledger.installed_parts(turbine.turbine_id);

    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json | OutputFormat::Auto => {
            let json = serde_json::to_string_pretty(&installed).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            println!("serial_number,part_number,description,installed_since");
            for instance in &installed {
                let master = document.master_by_part_number(&instance.part_number);
                let since = document
                    .open_record_for(instance.instance_id)
                    .map(|r| r.installation_date);
                println!(
                    "{},{},{},{}",
                    escape_csv(&instance.serial_number),
                    escape_csv(&instance.part_number),
                    escape_csv(master.map(|m| m.description.as_str()).unwrap_or("")),
                    fmt_opt_date(since)
                );
            }
        }
        OutputFormat::Tsv => {
            if installed.is_empty() {
                println!("No parts currently installed in {}.", args.turbine);
                return Ok(());
            }
            println!(
                "{:<16} {:<16} {:<28} {:<12}",
                style("SERIAL").bold(),
                style("PART #").bold(),
                style("DESCRIPTION").bold(),
                style("SINCE").bold()
            );
            println!("{}", "-".repeat(74));
            for instance in &installed {
                let description = document
                    .master_by_part_number(&instance.part_number)
                    .map(|m| m.description.as_str())
                    .unwrap_or("(not in catalog)");
                let since = document
                    .open_record_for(instance.instance_id)
                    .map(|r| r.installation_date);
                println!(
                    "{:<16} {:<16} {:<28} {:<12}",
                    style(truncate_str(&instance.serial_number, 14)).cyan(),
                    truncate_str(&instance.part_number, 14),
                    truncate_str(description, 26),
                    fmt_opt_date(since)
                );
            }
            println!();
            println!(
                "{} part(s) installed in {}.",
                style(installed.len()).cyan(),
                style(&args.turbine).cyan()
            );
        }
        OutputFormat::Id => {
            for instance in &installed {
                println!("{}", instance.serial_number);
            }
        }
    }

    Ok(())
}
