//! `config` subcommands over `config.toml` in the data directory.

use clap::Subcommand;
use serde_json::Value;
use timetable_core::{Config, ConfigError};

use crate::workspace::{confirm, CliResult, Workspace};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value, e.g. `conflicts.policy`
    Get { key: String },
    /// Change one value and save
    Set { key: String, value: String },
    /// Print every key as `key = value`
    List,
    /// Restore defaults
    Reset {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(ws: &mut Workspace, action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = ws
                .config
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            ws.config.set(&key, &value)?;
            ws.config.save_to(&ws.dir)?;
            println!("{key} = {}", ws.config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let mut lines = Vec::new();
            flatten("", &serde_json::to_value(&ws.config)?, &mut lines);
            for (key, value) in lines {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Reset { yes } => {
            if !yes && !confirm("Reset configuration to defaults?")? {
                println!("cancelled");
                return Ok(());
            }
            ws.config = Config::default();
            ws.config.save_to(&ws.dir)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Leaf values keyed by their dot path.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let path = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&path, v, out);
            }
        }
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
