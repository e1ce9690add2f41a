//! CLI argument parsing

use crate::commands::{self, CheckArgs, RulesArgs};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// formguard - declarative field validation from the command line
#[derive(Parser, Debug)]
#[command(name = "formguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate key=value pairs against a rule file
    Check(CheckArgs),

    /// List the rules defined in a rule file
    Rules(RulesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => commands::check(args),
            Commands::Rules(args) => commands::list_rules(args).map(|()| ExitCode::SUCCESS),
        }
    }
}
