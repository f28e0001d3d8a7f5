//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// grcflow - Multi-agent workflow orchestration for GRC documents.
#[derive(Debug, Parser)]
#[command(name = "grcflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show full step outputs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the steps of a workflow in execution order
    Show(ShowArgs),

    /// Check a workflow file for errors
    Validate(ValidateArgs),

    /// Run a workflow with an echo generator instead of a model
    DryRun(DryRunArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Workflow file
    pub file: PathBuf,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Workflow file
    pub file: PathBuf,
}

/// Arguments for the `dry-run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DryRunArgs {
    /// Workflow file
    pub file: PathBuf,

    /// Set a context variable (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, Value)>,

    /// Override settings.max_retries
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,

    /// Print the run as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse `KEY=VALUE`.
///
/// The value is read as a JSON scalar (number, boolean, null, quoted
/// string) when it parses as one, and as a plain string otherwise.
pub fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(v) if !v.is_array() && !v.is_object() => v,
        _ => Value::String(raw.to_string()),
    };

    Ok((key.to_string(), value))
}
