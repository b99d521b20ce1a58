//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use conta_core::CountUnit;

/// Streak counter with history and personal best.
///
/// Tracks the time elapsed since a start date in whole days or months, keeps
/// a log of completed runs, and remembers the longest one.
#[derive(Debug, Parser)]
#[command(name = "conta", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the counter text and current settings.
    Status {
        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Save settings for the running counter without closing it.
    Set {
        /// Label shown with the count.
        #[arg(long)]
        label: Option<String>,

        /// Use first-person plural phrasing.
        #[arg(long, conflicts_with = "singular")]
        plural: bool,

        /// Use first-person singular phrasing.
        #[arg(long)]
        singular: bool,

        /// Count unit (days or months).
        #[arg(long)]
        unit: Option<CountUnit>,

        /// Start date (YYYY-MM-DD).
        #[arg(long, conflicts_with = "today")]
        start: Option<NaiveDate>,

        /// Restart the count from today.
        #[arg(long)]
        today: bool,

        /// Freeze the count at this end date (YYYY-MM-DD).
        #[arg(long, conflicts_with = "clear_end")]
        end: Option<NaiveDate>,

        /// Drop the end date and resume counting to today.
        #[arg(long)]
        clear_end: bool,
    },

    /// Close the current run into history and start a new one from today.
    New,

    /// Show or reset the personal best.
    Record {
        #[command(subcommand)]
        action: Option<RecordAction>,
    },

    /// Inspect and edit the log of completed runs.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// Record operations.
#[derive(Debug, Subcommand)]
pub enum RecordAction {
    /// Show the current record.
    Show,
    /// Reset the record to zero. This cannot be undone.
    Reset,
}

/// History log operations.
#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List completed runs in insertion order.
    List {
        /// Output as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Add a completed run with the given dates.
    Add {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
    },
    /// Re-date a completed run; its count is recomputed from the dates.
    Edit {
        /// ID of the entry to edit.
        id: String,
        /// New start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// New end date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Delete a completed run.
    Remove {
        /// ID of the entry to delete.
        id: String,
    },
}
