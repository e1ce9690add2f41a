//! Rules command: list a rule file

use super::load_rules;
use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rule file (.toml or .json)
    #[arg(short, long)]
    pub rules: PathBuf,
}

pub fn list_rules(args: RulesArgs) -> Result<()> {
    // Building also surfaces bad patterns and empty choice lists.
    let (config, _) = load_rules(&args.rules)?;

    if config.fields.is_empty() {
        println!("{}", style("no rules defined").dim());
        return Ok(());
    }

    for (field, specs) in &config.fields {
        println!("{}", style(field).bold());
        for spec in specs {
            println!("  - {}", spec);
        }
    }
    Ok(())
}
