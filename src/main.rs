use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fleetdesk::config::ShellConfig;
use fleetdesk::tui_shell;

#[derive(Parser)]
#[command(name = "fleetdesk")]
#[command(about = "Ground-transport operations console", long_about = None)]
struct Cli {
    /// Open on a specific tab (employees, drivers, allies, vehicles, hotels, zones, routes)
    #[arg(long)]
    tab: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration
    Config {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("get current dir")?;
    let mut config = ShellConfig::load_from(&cwd)?;
    if let Some(tab) = cli.tab {
        config.start_tab = Some(tab);
    }

    match cli.command {
        Some(Commands::Config { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!(
                    "start_tab: {}",
                    config.start_tab.as_deref().unwrap_or("employees")
                );
                println!("absolute_timestamps: {}", config.absolute_timestamps);
                println!("poll_ms: {}", config.poll_ms);
            }
            Ok(())
        }
        None => tui_shell::run(config),
    }
}

/// Diagnostics go to a file; the terminal belongs to the TUI.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("FLEETDESK_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
