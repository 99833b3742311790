//! CLI argument definitions for the dotree binary.

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Build a nested map from dotted assignments and query it
#[derive(Parser, Debug)]
#[command(name = "dotree")]
#[command(about = "dotree: query nested maps with dotted key paths")]
#[command(version)]
pub struct Cli {
    /// Assignment applied in order before the query, e.g. `a.b=1` or `l=[1,2]`.
    /// The value is parsed as JSON, falling back to a plain string.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, serde_json::Value)>,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = "human",
        env = "DOTREE_FORMAT",
        global = true
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a key
    Get(KeyArgs),
    /// Report whether a key resolves
    Contains(KeyArgs),
    /// List every leaf key
    Keys,
    /// List every leaf key with its value
    Items,
    /// Remove a leaf or subtree and print it
    Pop(KeyArgs),
    /// Delete a leaf or empty layer and print what remains
    Delete(KeyArgs),
}

/// Arguments for commands acting on one key
#[derive(clap::Args, Debug)]
pub struct KeyArgs {
    /// Dotted key path, e.g. `a.b..x` or `l[a.b+1].d`
    pub key: String,
}

/// Parses a `KEY=VALUE` assignment.
///
/// Only the first `=` splits, so values may contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment '{s}': expected KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("invalid assignment '{s}': empty key"));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
