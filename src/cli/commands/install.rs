//! `tpt install` command - open an installation episode

use chrono::NaiveDate;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::open_ledger;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct InstallArgs {
    /// Serial number of the part instance
    pub part: String,

    /// Serial number of the turbine to install it into
    pub turbine: String,

    /// Installation date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: InstallArgs, global: &GlobalOpts) -> Result<()> {
    let mut ledger = open_ledger(global).into_diagnostic()?;

    let record = ledger
        .install(&args.part, &args.turbine, args.date)
        .into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Installed {} in {} on {}",
            style("✓").green(),
            style(&args.part).cyan(),
            style(&args.turbine).cyan(),
            record.installation_date
        );
    }
    Ok(())
}
