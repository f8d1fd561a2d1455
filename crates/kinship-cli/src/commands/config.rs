//! `kinship config`: inspect and edit the TOML config file

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name, e.g. layout.card_width
        key: String,
    },
    /// Change one setting
    Set {
        /// Setting name, e.g. default_root
        key: String,
        value: String,
    },
    /// Reset one setting to its default
    Unset {
        key: String,
    },
    /// Print every setting
    List,
    /// Print where the config file lives
    Path,
    /// Write a config file with default settings
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, path: &Path) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            ensure_known(key)?;
            println!("{}", display_value(&config, key));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(path)?;
            config.set(key, value)?;
            config.save(path)?;
            tracing::info!("Updated {} in {:?}", key, path);
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            let mut config = Config::load(path)?;
            config.unset(key)?;
            config.save(path)?;
            println!("Reset {} to {}", key, display_value(&config, key));
        }
        ConfigCommands::List => {
            let config = Config::load(path)?;
            println!("# {}", path.display());
            for key in Config::keys() {
                println!("{} = {}", key, display_value(&config, key));
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => init(path, *force)?,
    }
    Ok(())
}

fn ensure_known(key: &str) -> anyhow::Result<()> {
    if Config::keys().contains(&key) {
        return Ok(());
    }
    anyhow::bail!(
        "Unknown config key: {}. Available keys: {}",
        key,
        Config::keys().join(", ")
    )
}

fn display_value(config: &Config, key: &str) -> String {
    config.get(key).unwrap_or_else(|| "(not set)".to_string())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    Config::default().save(path)?;
    println!("Created config file at {}", path.display());
    Ok(())
}
