//! Kinship CLI - Command line interface for the family graph engine

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, layout, path, stats, tree};
use config::Config;
use kinship_core::{FamilySnapshot, FamilySource, MemberId};
use kinship_storage::JsonFileStore;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Family relationship graph and tree-layout engine")]
pub struct Cli {
    /// Family snapshot file (JSON with "members" and "relationships")
    #[arg(short, long, global = true, env = "KINSHIP_DATA")]
    pub data: Option<PathBuf>,

    /// Config file (default: <config dir>/kinship/config.toml)
    #[arg(long, global = true, env = "KINSHIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the family tree by generation
    Tree(tree::TreeArgs),
    /// Compute card positions for rendering
    Layout(layout::LayoutArgs),
    /// Find the relationship path between two members
    Path(path::PathArgs),
    /// Show tree statistics
    Stats(stats::StatsArgs),
    /// Check the family data for inconsistencies
    Check,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the record source and loaded configuration
pub struct AppContext {
    pub source: JsonFileStore,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let Some(data) = cli.data.clone().or_else(|| config.data_file.clone()) else {
            anyhow::bail!(
                "No family data file. Pass --data <file> or run 'kinship config set data_file <file>'"
            );
        };
        tracing::debug!("Using family data at: {:?}", data);

        Ok(Self {
            source: JsonFileStore::new(data),
            config,
            format: OutputFormat::from(cli.format.as_str()),
        })
    }

    pub async fn snapshot(&self) -> anyhow::Result<FamilySnapshot> {
        let snapshot = self.source.snapshot().await?;
        tracing::info!(
            "Loaded {} members and {} relationships",
            snapshot.members.len(),
            snapshot.relationships.len()
        );
        Ok(snapshot)
    }

    /// Pick the root: explicit argument, then configured default, then the
    /// first member
    pub fn resolve_root(
        &self,
        snapshot: &FamilySnapshot,
        requested: Option<&str>,
    ) -> anyhow::Result<MemberId> {
        let chosen = requested
            .map(MemberId::from)
            .or_else(|| self.config.default_root.as_deref().map(MemberId::from));

        match chosen {
            Some(id) => {
                if snapshot.member(&id).is_none() {
                    anyhow::bail!("Member '{}' not found", id);
                }
                Ok(id)
            }
            None => match snapshot.members.first() {
                Some(member) => Ok(member.id.clone()),
                None => anyhow::bail!("No family members found"),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinship CLI");

    let config_path = config::config_file_path(cli.config.as_deref());

    match &cli.command {
        Commands::Config(args) => return commands::config::run(args, &config_path),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let config = Config::load(&config_path)?;
    let ctx = AppContext::new(&cli, config)?;

    match &cli.command {
        Commands::Tree(args) => tree::run(args, &ctx).await?,
        Commands::Layout(args) => layout::run(args, &ctx).await?,
        Commands::Path(args) => path::run(args, &ctx).await?,
        Commands::Stats(args) => stats::run(args, &ctx).await?,
        Commands::Check => check::run(&ctx).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
