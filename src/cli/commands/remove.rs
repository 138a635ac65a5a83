//! `tpt remove` command - close the active installation episode

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{fmt_opt_date, open_ledger};
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Serial number of the part instance
    pub part: String,

    /// Removal date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Turbine fired-hours reading at removal (also updates the turbine)
    #[arg(long)]
    pub hours: Option<f64>,

    /// Turbine start-count reading at removal (also updates the turbine)
    #[arg(long)]
    pub starts: Option<u32>,
}

pub fn run(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let record = ledger
        .remove(&args.part, args.date, args.hours, args.starts)
        .into_diagnostic()?;

    if !global.quiet {
        let turbine = ledger
            .document()
            .turbine_by_id(record.turbine_id)
            .map(|t| t.serial_number.clone())
            .unwrap_or_else(|| format!("turbine {}", record.turbine_id));
        println!(
            "{} Removed {} from {} on {}",
            style("✓").green(),
            style(&args.part).cyan(),
            style(turbine).cyan(),
            fmt_opt_date(record.removal_date)
        );
    }
    Ok(())
}
