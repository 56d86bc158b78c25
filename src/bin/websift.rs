//! CLI binary for websift.
//!
//! Results go to stdout; all diagnostics go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use websift::{AppConfig, ConfigSource, ProviderKind};

/// websift: find the first good link for a query, or ask for an answer.
#[derive(Parser)]
#[command(name = "websift", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Resolve a query to its first eligible link (or an answer for metaso).
    Search {
        /// Provider to use: metaso, bing, google, duckduckgo (default from config).
        #[arg(short, long)]
        provider: Option<ProviderKind>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,

        /// Query words.
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration file actions.
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Print the effective configuration with API keys redacted.
    Show,
    /// Write a default configuration file if none exists.
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` must work before the file it creates exists.
    let creating = matches!(
        cli.command,
        Command::Config {
            action: ConfigAction::Init
        }
    );
    let (mut config, source) = match cli.config.as_deref() {
        Some(path) if creating && !path.exists() => {
            (AppConfig::default(), ConfigSource::Defaults(path.to_path_buf()))
        }
        path => AppConfig::load(path)?,
    };
    config.apply_env_overrides();

    let _guard = websift::logging::init(&config.logging, &websift::dirs::logs_dir())?;
    match &source {
        ConfigSource::File(path) => tracing::debug!(path = %path.display(), "config loaded"),
        ConfigSource::Defaults(path) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
        }
    }

    match cli.command {
        Command::Search {
            provider,
            json,
            query,
        } => run_search(&config, provider, json, &query.join(" ")).await,
        Command::Config { action } => run_config(&config, cli.config, action),
    }
}

async fn run_search(
    config: &AppConfig,
    provider: Option<ProviderKind>,
    json: bool,
    query: &str,
) -> anyhow::Result<()> {
    let provider = provider.unwrap_or(config.search.provider);
    let search_config = websift::startup::initialize(config, provider)?;

    let outcome = websift::run_lookup(&search_config, provider, query)
        .await
        .map_err(|e| {
            tracing::error!(%provider, error = %e, "lookup failed");
            anyhow::anyhow!("{provider} search failed: {e}")
        })?;

    if json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }

    if outcome.is_not_found() {
        eprintln!("no eligible link found");
    } else {
        println!("{}", outcome.as_str());
    }
    Ok(())
}

fn run_config(
    config: &AppConfig,
    explicit_path: Option<PathBuf>,
    action: ConfigAction,
) -> anyhow::Result<()> {
    let path = explicit_path.unwrap_or_else(AppConfig::default_config_path);
    match action {
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Show => print!("{}", toml::to_string_pretty(&config.redacted())?),
        ConfigAction::Init => {
            if path.exists() {
                println!("config already exists at {}", path.display());
            } else {
                AppConfig::default().save_to_file(&path)?;
                println!("wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
