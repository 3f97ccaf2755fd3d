//! Command handlers module.
//!
//! - `ledger.rs`: ledger commands (add, list, publish, discard, log, status)
//! - `config.rs`: configuration display command

mod config;
mod ledger;

use clap::ValueEnum;
use memolog::MemoSelector;
use std::process::ExitCode;

pub use config::cmd_config;
pub use ledger::{cmd_add, cmd_discard, cmd_list, cmd_log, cmd_publish, cmd_status};

/// Result of a command handler.
///
/// `Ok` carries the exit code so "nothing to do" outcomes can fail without
/// being errors.
pub type CommandResult = Result<ExitCode, Box<dyn std::error::Error>>;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Builds a selector from the mutually exclusive text/index arguments.
pub fn selector(text: Option<String>, index: Option<usize>) -> Result<MemoSelector, String> {
    match (text, index) {
        (_, Some(index)) => Ok(MemoSelector::Index(index)),
        (Some(text), None) => Ok(MemoSelector::Text(text)),
        (None, None) => Err("either memo text or --index is required".to_string()),
    }
}
