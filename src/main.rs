//! Binary entry point for memolog.
//!
//! This binary provides the CLI interface for the memo ledger.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{CommandResult, OutputFormat};
use memolog::config::MemologConfig;
use memolog::observability::{self, InitOptions};
use std::path::PathBuf;
use std::process::ExitCode;

/// Memolog - moves article memos from a pending list to a done log.
#[derive(Parser)]
#[command(name = "memolog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "MEMOLOG_CONFIG_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Append a memo to the pending list.
    Add {
        /// Memo text.
        #[arg(required_unless_present = "from_stdin")]
        text: Option<String>,

        /// Read the memo from stdin.
        #[arg(long, conflicts_with = "text")]
        from_stdin: bool,
    },

    /// List pending memos.
    List {
        /// Output format: text or json.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Record a memo as published and remove it from the pending list.
    Publish {
        /// Exact memo text.
        #[arg(required_unless_present = "index")]
        text: Option<String>,

        /// 1-based position in `memolog list`.
        #[arg(short, long, conflicts_with = "text")]
        index: Option<usize>,

        /// Article title.
        #[arg(short, long)]
        title: String,

        /// Article slug.
        #[arg(short, long)]
        slug: String,

        /// Publication time as "YYYY-MM-DD HH:MM:SS" (default: now).
        #[arg(long)]
        at: Option<String>,
    },

    /// Remove a pending memo without recording it.
    Discard {
        /// Exact memo text.
        #[arg(required_unless_present = "index")]
        text: Option<String>,

        /// 1-based position in `memolog list`.
        #[arg(short, long, conflicts_with = "text")]
        index: Option<usize>,
    },

    /// Show published articles.
    Log {
        /// Output format: text or json.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show only the record with this slug.
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show ledger status.
    Status,

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_config(
        &config.logging,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    for (path, reason) in &config.skipped_sources {
        tracing::warn!(path = %path.display(), error = %reason, "Ignoring config file");
    }

    match run_command(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(command: Commands, config: &MemologConfig) -> CommandResult {
    match command {
        Commands::Add { text, from_stdin } => commands::cmd_add(config, text, from_stdin),

        Commands::List { format } => commands::cmd_list(config, format),

        Commands::Publish {
            text,
            index,
            title,
            slug,
            at,
        } => commands::cmd_publish(config, text, index, &title, &slug, at),

        Commands::Discard { text, index } => commands::cmd_discard(config, text, index),

        Commands::Log { format, slug } => commands::cmd_log(config, format, slug),

        Commands::Status => commands::cmd_status(config),

        Commands::Config { show } => commands::cmd_config(config, show),

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "memolog", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Loads configuration.
///
/// An explicit path (flag or `MEMOLOG_CONFIG_PATH`) must load; otherwise the
/// default locations are searched. Env overrides apply in both cases.
fn load_config(path: Option<&std::path::Path>) -> Result<MemologConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => MemologConfig::load_from_file(path)?,
        None => MemologConfig::load_default(),
    };
    Ok(config.apply_env_overrides())
}
