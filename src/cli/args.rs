//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    import::ImportArgs,
    init::InitArgs,
    install::InstallArgs,
    installed::InstalledArgs,
    instance::InstanceCommands,
    lifecycle::LifecycleArgs,
    log::LogCommands,
    part::PartCommands,
    remove::RemoveArgs,
    turbine::TurbineCommands,
};

#[derive(Parser)]
#[command(name = "tpt")]
#[command(author, version, about = "Turbine Parts Toolkit")]
#[command(
    long_about = "Track turbines, serialized parts, installation history, and maintenance logs in a plain JSON data file."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Path to the JSON data file
    #[arg(
        long,
        short = 'd',
        global = true,
        env = "TPT_DATA",
        default_value = "data.json"
    )]
    pub data: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty data file
    Init(InitArgs),

    /// Turbine management
    #[command(subcommand)]
    Turbine(TurbineCommands),

    /// Part catalog management (part types)
    #[command(subcommand)]
    Part(PartCommands),

    /// Serialized part instance management
    #[command(subcommand)]
    Instance(InstanceCommands),

    /// Install a part instance into a turbine
    Install(InstallArgs),

    /// Remove a part instance from the turbine it is installed in
    Remove(RemoveArgs),

    /// Maintenance log management
    #[command(subcommand)]
    Log(LogCommands),

    /// List the parts currently installed in a turbine
    Installed(InstalledArgs),

    /// Show the full installation and maintenance history of a part
    Lifecycle(LifecycleArgs),

    /// Bulk-import part instances from a CSV file
    Import(ImportArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for lists, detail for show)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just serial numbers, one per line
    Id,
}
