//! switch-branch - A TUI for switching to the branches of your open pull requests
//!
//! Lists the default branch plus the head branch of every open pull request
//! you authored in the `origin` repository on GitHub, and checks out the one
//! you pick.

mod app;
mod browser;
mod catalog;
mod config;
mod error;
mod forge;
mod git;
mod ui;
mod workflow;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Exit};
use config::{Config, FileCredentialStore};
use forge::{DEFAULT_API_URL, GitHubClient, GitHubConfig};
use git::Repository;
use workflow::EffectRunner;

/// switch-branch - Check out the branch of one of your open pull requests
#[derive(Parser, Debug)]
#[command(name = "switch-branch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the git working copy (defaults to current directory)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Enable debug logging (writes to switch-branch-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: Url,

    /// Give up on a GitHub request after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print where the access token is stored and whether one is set
    #[arg(long)]
    show_config: bool,

    /// Remove the stored access token
    #[arg(long)]
    forget_token: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install()?;

    let repo_path = match args.path.clone() {
        Some(path) => path,
        None => std::env::current_dir().wrap_err("Failed to get current directory")?,
    };

    let is_tui_mode = !args.show_config && !args.forget_token;
    init_logging(is_tui_mode, args.debug, &repo_path)?;

    let config_path =
        Config::default_path().ok_or_else(|| eyre!("Could not determine the config directory"))?;

    if args.show_config {
        return show_config(&config_path);
    }

    if args.forget_token {
        return forget_token(&config_path);
    }

    let mut forge_config = GitHubConfig::new(args.api_url.clone());
    if let Some(secs) = args.timeout {
        forge_config = forge_config.with_timeout(Duration::from_secs(secs));
    }
    let forge = GitHubClient::new(forge_config)?;

    let store = Arc::new(FileCredentialStore::new(config_path));
    let runner = EffectRunner::new(
        Arc::new(Repository::at(&repo_path)),
        Arc::new(forge),
        store.clone(),
    );

    let runtime = tokio::runtime::Runtime::new().wrap_err("Failed to start the async runtime")?;
    info!(
        "Starting in {}, credential file {}",
        repo_path.display(),
        store.path().display()
    );

    // Run the TUI application
    let terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), crossterm::event::EnableBracketedPaste).ok();

    let app = App::new(&repo_path, runner, store, runtime.handle().clone());
    let result = app.run(terminal);

    crossterm::execute!(std::io::stdout(), crossterm::event::DisableBracketedPaste).ok();
    ratatui::restore();

    // Leave without waiting on effects still in flight after a quit
    runtime.shutdown_background();

    match result? {
        Exit::Quit => Ok(()),
        Exit::Switched(branch) => {
            println!("✔ Switched to {}", branch);
            Ok(())
        }
        Exit::NotARepository => Err(eyre!(
            "{} is not a git repository",
            repo_path.display()
        )),
        Exit::Failed(error) => Err(eyre!(error)),
    }
}

/// In TUI mode only log to a file, and only with `--debug`; CLI commands log to stderr
fn init_logging(is_tui_mode: bool, debug: bool, repo_path: &Path) -> Result<()> {
    if is_tui_mode {
        if debug {
            let log_file = std::fs::File::create(repo_path.join("switch-branch-debug.log"))
                .wrap_err("Failed to create log file")?;
            tracing_subscriber::registry()
                .with(EnvFilter::new("debug"))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(log_file),
                )
                .init();
        }
    } else {
        let filter = if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        };
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

/// Show where the credential lives and whether a token is stored
fn show_config(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("switch-branch Configuration");
    println!("===========================");
    println!();
    println!("Config file: {}", config_path.display());
    println!(
        "Access token: {}",
        config.masked_token().as_deref().unwrap_or("(none)")
    );
    if let Some(saved_at) = config.saved_at {
        println!("Saved at: {}", saved_at.to_rfc3339());
    }

    Ok(())
}

/// Remove the stored token, keeping the rest of the file
fn forget_token(config_path: &Path) -> Result<()> {
    let mut config = Config::load(config_path)?;

    if config.token().is_none() {
        println!("No access token stored");
        return Ok(());
    }

    config.clear_token();
    config
        .save(config_path)
        .with_context(|| format!("Failed to update {}", config_path.display()))?;
    println!("Access token removed from {}", config_path.display());

    Ok(())
}
