//! CLI for the awsq Query-protocol client.

mod commands;

use anyhow::Result;
use awsq_core::config;
use clap::{ArgAction, Args, Parser, Subcommand};

use commands::{run_invoke, run_services, run_sign};

/// Top-level CLI for awsq.
#[derive(Debug, Parser)]
#[command(name = "awsq")]
#[command(about = "awsq: signed AWS Query-protocol requests from the command line", long_about = None)]
pub struct Cli {
    /// More log detail (-v, -vv). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Service, action and wire parameters shared by `invoke` and `sign`.
#[derive(Debug, Args)]
pub struct Target {
    /// Service name, e.g. `sdb` or `iam` (see `awsq services`).
    pub service: String,

    /// Action name, e.g. `ListDomains`.
    pub action: String,

    /// Wire parameter as Name=Value. Repeatable.
    #[arg(short = 'p', long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Endpoint URL, overriding the profile and config file.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// API version, overriding the profile and config file.
    #[arg(long, value_name = "VERSION")]
    pub api_version: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Invoke an action and print the decoded response as JSON.
    Invoke {
        #[command(flatten)]
        target: Target,

        /// Single-line JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },

    /// Print the string-to-sign, signature and body without sending anything.
    Sign {
        #[command(flatten)]
        target: Target,

        /// Request timestamp (RFC 3339). Defaults to now.
        #[arg(long, value_name = "TS")]
        timestamp: Option<String>,
    },

    /// List built-in service profiles and their resolved endpoints.
    Services,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Invoke { target, compact } => run_invoke(&cfg, &target, compact)?,
            CliCommand::Sign { target, timestamp } => run_sign(&cfg, &target, timestamp.as_deref())?,
            CliCommand::Services => run_services(&cfg),
        }

        Ok(())
    }
}

/// `Name=Value`; the value may be empty or contain `=`.
pub(crate) fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests;
