mod adapters;
mod cli;
mod config;
mod core;

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose, args.quiet);
    cli::context::init(args.config.as_deref());

    let env_file = Path::new(&args.env_file);

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(),
        Commands::Watch(watch) => cli::commands::watch::execute(watch, env_file),
        Commands::Log {
            entity,
            since,
            last,
            log_file,
        } => cli::commands::log::execute(
            entity.as_deref(),
            since.as_deref(),
            *last,
            log_file.as_deref(),
        ),
        Commands::Status(source) => cli::commands::status::execute(source, env_file),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr. `RUST_LOG` wins over the flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
