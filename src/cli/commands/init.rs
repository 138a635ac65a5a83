//! `tpt init` command - create an empty data file

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GlobalOpts;
use crate::core::{Document, JsonStore, Store};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing data file
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let store = JsonStore::new(&global.data);

    if store.path().exists() && !args.force {
        return Err(miette::miette!(
            "data file {} already exists (use --force to start over)",
            store.path().display()
        ));
    }

    store.save(&Document::default()).into_diagnostic()?;

    if !global.quiet {
        println!(
            "{} Initialized empty data file at {}",
            style("✓").green(),
            style(store.path().display()).cyan()
        );
    }
    Ok(())
}
