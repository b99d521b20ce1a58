//! Streak counter CLI library.
//!
//! This crate provides the CLI interface for the streak counter.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, HistoryAction, RecordAction};
pub use config::Config;
