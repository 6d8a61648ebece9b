// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pingdom Occurrence CLI
//!
//! Works with the occurrences of a maintenance window as one group. A group
//! is addressed either by its encoded identifier
//! (`--id 42:1767225600:1769904000`) or by its parts
//! (`--maintenance-id 42 --from ... --to ...`). Times are unix seconds or
//! RFC3339.
//!
//! Run with: cargo run --bin pingdom-occurrences -- list --id 42:0:1769904000
//!
//! Prerequisites:
//! 1. Pingdom API token (via PINGDOM_API_TOKEN environment variable or --token)

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Args, Parser, Subcommand};
use pingdom_provider::adapters::PingdomClient;
use pingdom_provider::config::{ProviderConfig, DEFAULT_BASE_URL};
use pingdom_provider::domain::OccurrenceQuery;
use pingdom_provider::occurrence::{OccurrenceGroup, OccurrenceState};
use tracing::info;

#[derive(Parser)]
#[command(name = "pingdom-occurrences")]
#[command(about = "Manage Pingdom maintenance occurrences as groups")]
#[command(version)]
struct Cli {
    /// Pingdom API token
    #[arg(long, env = "PINGDOM_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Pingdom API base URL
    #[arg(long, env = "PINGDOM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "PINGDOM_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the occurrences in a group
    List {
        #[command(flatten)]
        target: Target,
    },

    /// Show the group state (first occurrence and group size)
    Show {
        #[command(flatten)]
        target: Target,
    },

    /// Move every occurrence in a group to a new window
    Update {
        #[command(flatten)]
        target: Target,

        /// New start of each occurrence
        #[arg(long, value_parser = parse_time, allow_negative_numbers = true)]
        set_from: i64,

        /// New end of each occurrence
        #[arg(long, value_parser = parse_time, allow_negative_numbers = true)]
        set_to: i64,
    },

    /// Delete every occurrence in a group
    Delete {
        #[command(flatten)]
        target: Target,
    },
}

/// Group address: encoded identifier or its three parts
#[derive(Args)]
struct Target {
    /// Encoded group identifier (maintenance_id:from:to)
    #[arg(long, conflicts_with_all = ["maintenance_id", "from", "to"])]
    id: Option<String>,

    /// Maintenance window id
    #[arg(long, requires_all = ["from", "to"])]
    maintenance_id: Option<i64>,

    /// Start of the effective range
    #[arg(long, value_parser = parse_time, allow_negative_numbers = true)]
    from: Option<i64>,

    /// End of the effective range
    #[arg(long, value_parser = parse_time, allow_negative_numbers = true)]
    to: Option<i64>,
}

impl Target {
    fn group(&self) -> Result<OccurrenceGroup> {
        match (&self.id, self.maintenance_id, self.from, self.to) {
            (Some(id), _, _, _) => OccurrenceGroup::from_identifier(id)
                .with_context(|| format!("Invalid group identifier '{}'", id)),
            (None, Some(maintenance_id), Some(from), Some(to)) => Ok(OccurrenceGroup::new(
                OccurrenceQuery::new(maintenance_id, from, to),
            )),
            _ => bail!("Either --id or --maintenance-id with --from and --to is required"),
        }
    }
}

/// Unix seconds or an RFC3339 timestamp
fn parse_time(raw: &str) -> Result<i64, String> {
    if let Ok(seconds) = raw.parse::<i64>() {
        return Ok(seconds);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|time| time.timestamp())
        .map_err(|e| format!("expected unix seconds or RFC3339, got '{}': {}", raw, e))
}

async fn run(cli: Cli) -> Result<()> {
    let config = ProviderConfig {
        base_url: cli.base_url.trim_end_matches('/').to_string(),
        api_token: cli.token,
        timeout_secs: cli.timeout,
    };
    let client = Arc::new(PingdomClient::new(config).context("Failed to configure Pingdom client")?);

    match cli.command {
        Commands::List { target } => {
            let group = target.group()?;
            let occurrences = group.list(client.as_ref()).await?;
            info!(group = %group.id(), count = occurrences.len(), "Listed occurrences");
            println!("{}", serde_json::to_string_pretty(&occurrences)?);
        }
        Commands::Show { target } => {
            let group = target.group()?;
            let mut state = OccurrenceState::from(*group.query());
            state
                .populate(&group, client.as_ref())
                .await
                .with_context(|| format!("Failed to read group {}", group.id()))?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Update {
            target,
            set_from,
            set_to,
        } => {
            let group = target.group()?;
            let updated = group
                .update(&client, set_from, set_to)
                .await
                .with_context(|| format!("Failed to update group {}", group.id()))?;
            println!("Updated {} occurrences in {}", updated, group.id());
        }
        Commands::Delete { target } => {
            let group = target.group()?;
            let deleted = group
                .delete(&client)
                .await
                .with_context(|| format!("Failed to delete group {}", group.id()))?;
            println!("Deleted {} occurrences in {}", deleted, group.id());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
