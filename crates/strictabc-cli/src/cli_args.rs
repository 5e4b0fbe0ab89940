use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strictabc",
    version,
    about = "Signature-strict abstract method checking for Python classes"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log progress to stderr (overridden by STRICTABC_LOG)
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Write a default .strictabc/strictabc.json
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Validate every subclass against its parent's abstract methods
    Check {
        /// Files or directories to check (default: current directory)
        paths: Vec<String>,
    },

    /// Describe a finding code
    Explain {
        /// Finding code (e.g. A004)
        code: String,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
