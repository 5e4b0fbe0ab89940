//! strictabc CLI: signature-strict abstract method checking for Python.
//!
//! Provides the `strictabc` command with `init`, `check` and `explain`
//! subcommands. See `strictabc --help` for usage.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "STRICTABC_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let formatter: Box<dyn strictabc_output::OutputFormatter> = if cli.json {
        Box::new(strictabc_output::json::JsonFormatter)
    } else {
        Box::new(strictabc_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Init { force } => commands::init::run(cli.verbose, force),
        Commands::Check { paths } => commands::check::run(&*formatter, cli.verbose, paths),
        Commands::Explain { code } => commands::explain::run(&*formatter, code),
    };
    std::process::exit(exit_code);
}
