//! Config command handler.

use super::CommandResult;
use memolog::config::MemologConfig;
use memolog::observability::LoggingConfig;
use std::process::ExitCode;

/// Config command.
pub fn cmd_config(config: &MemologConfig, show: bool) -> CommandResult {
    if !show {
        println!("Use 'memolog config --show' to view the current configuration");
        return Ok(ExitCode::SUCCESS);
    }

    println!("Current Configuration");
    println!("=====================");
    println!();

    println!("Config Files Loaded:");
    if config.config_sources.is_empty() {
        println!("  (none - using defaults)");
    } else {
        for source in &config.config_sources {
            println!("  - {}", source.display());
        }
    }
    if !config.skipped_sources.is_empty() {
        println!("Config Files Skipped:");
        for (source, reason) in &config.skipped_sources {
            println!("  - {} ({reason})", source.display());
        }
    }
    println!();

    println!("Data Directory: {}", config.data_dir.display());
    println!("Pending File: {}", config.pending_path().display());
    println!("Done Log: {}", config.done_path().display());
    println!();

    let logging = LoggingConfig::from_settings(Some(&config.logging), false);
    println!("Logging:");
    println!("  Filter: {}", logging.filter);
    println!("  Format: {:?}", logging.format);
    println!(
        "  File: {}",
        logging
            .file
            .as_ref()
            .map_or_else(|| "(stderr)".to_string(), |p| p.display().to_string())
    );

    Ok(ExitCode::SUCCESS)
}
