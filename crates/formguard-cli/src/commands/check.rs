//! Check command: validate key=value input

use super::load_rules;
use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule file (.toml or .json)
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Input values
    #[arg(value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub pairs: Vec<(String, String)>,
}

/// Result printed with `--json`.
#[derive(Debug, Serialize)]
struct Report {
    valid: bool,
    errors: BTreeMap<String, Vec<String>>,
}

/// Split on the first `=`; the value may contain more.
fn parse_pair(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    if key.is_empty() {
        return Err(format!("missing key in `{arg}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub fn check(args: CheckArgs) -> Result<ExitCode> {
    let (_, rules) = load_rules(&args.rules)?;

    let errors = match rules.validate(args.pairs.iter().map(|(k, v)| (k, v))) {
        Ok(()) => BTreeMap::new(),
        Err(errors) => errors.into_message_map(),
    };
    let valid = errors.is_empty();

    if args.json {
        let report = Report { valid, errors };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if valid {
        println!("{}", style("ok").green());
    } else {
        for (field, messages) in &errors {
            for message in messages {
                println!("{}: {}", style(field).red().bold(), message);
            }
        }
    }

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
