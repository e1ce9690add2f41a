//! CLI commands

mod check;
mod rules;

pub use check::{check, CheckArgs};
pub use rules::{list_rules, RulesArgs};

use anyhow::{Context, Result};
use formguard::{RuleSet, RuleSetConfig};
use std::path::Path;

/// Load a rule file and compile it.
fn load_rules(path: &Path) -> Result<(RuleSetConfig, RuleSet)> {
    let config = RuleSetConfig::load(path)
        .with_context(|| format!("could not load rules from {}", path.display()))?;
    let rules = config
        .build()
        .with_context(|| format!("invalid rules in {}", path.display()))?;
    tracing::debug!(path = %path.display(), fields = rules.len(), "loaded rule file");
    Ok((config, rules))
}
