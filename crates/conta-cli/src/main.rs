use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conta_cli::commands::set::SetOptions;
use conta_cli::commands::{history, new, record, set, status};
use conta_cli::{Cli, Commands, Config, HistoryAction, RecordAction};
use conta_store::Store;

/// Load config and open the store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<Store> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    Store::open(&config.database_path).context("failed to open database")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let today = chrono::Local::now().date_naive();
    let mut stdout = std::io::stdout();

    match cli.command {
        Some(Commands::Status { json }) => {
            let store = open_store(cli.config.as_deref())?;
            status::run(&mut stdout, &store, today, json)?;
        }
        Some(Commands::Set {
            label,
            plural,
            singular,
            unit,
            start,
            today: start_today,
            end,
            clear_end,
        }) => {
            let mut store = open_store(cli.config.as_deref())?;
            let plural = if plural {
                Some(true)
            } else if singular {
                Some(false)
            } else {
                None
            };
            let options = SetOptions {
                label,
                plural,
                unit,
                start,
                today: start_today,
                end,
                clear_end,
            };
            set::run(&mut stdout, &mut store, today, options)?;
        }
        Some(Commands::New) => {
            let mut store = open_store(cli.config.as_deref())?;
            new::run(&mut stdout, &mut store, today)?;
        }
        Some(Commands::Record { action }) => {
            match action.unwrap_or(RecordAction::Show) {
                RecordAction::Show => {
                    let store = open_store(cli.config.as_deref())?;
                    record::show(&mut stdout, &store, today)?;
                }
                RecordAction::Reset => {
                    let mut store = open_store(cli.config.as_deref())?;
                    record::reset(&mut stdout, &mut store, today)?;
                }
            }
        }
        Some(Commands::History { action }) => {
            match action {
                HistoryAction::List { json } => {
                    let store = open_store(cli.config.as_deref())?;
                    history::list(&mut stdout, &store, today, json)?;
                }
                HistoryAction::Add { start, end } => {
                    let mut store = open_store(cli.config.as_deref())?;
                    history::add(&mut stdout, &mut store, today, start, end)?;
                }
                HistoryAction::Edit { id, start, end } => {
                    let mut store = open_store(cli.config.as_deref())?;
                    history::edit(&mut stdout, &mut store, today, &id, start, end)?;
                }
                HistoryAction::Remove { id } => {
                    let mut store = open_store(cli.config.as_deref())?;
                    history::remove(&mut stdout, &mut store, today, &id)?;
                }
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
