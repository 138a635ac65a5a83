use clap::Parser;
use miette::Result;
use tpt::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => tpt::cli::commands::init::run(args, &global),
        Commands::Turbine(cmd) => tpt::cli::commands::turbine::run(cmd, &global),
        Commands::Part(cmd) => tpt::cli::commands::part::run(cmd, &global),
        Commands::Instance(cmd) => tpt::cli::commands::instance::run(cmd, &global),
        Commands::Install(args) => tpt::cli::commands::install::run(args, &global),
        Commands::Remove(args) => tpt::cli::commands::remove::run(args, &global),
        Commands::Log(cmd) => tpt::cli::commands::log::run(cmd, &global),
        Commands::Installed(args) => tpt::cli::commands::installed::run(args, &global),
        Commands::Lifecycle(args) => tpt::cli::commands::lifecycle::run(args, &global),
        Commands::Import(args) => tpt::cli::commands::import::run(args, &global),
        Commands::Completions(args) => tpt::cli::commands::completions::run(args),
    }
}
