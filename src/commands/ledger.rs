//! Ledger command handlers.
//!
//! Contains the implementation of the commands that read or move memos:
//! add, list, publish, discard, log, status.

use super::{CommandResult, OutputFormat, selector};
use chrono::NaiveDateTime;
use memolog::config::MemologConfig;
use memolog::models::TIMESTAMP_FORMAT;
use memolog::{ArticleSlug, DoneRecord, MoveOutcome, MoveRequest, PublishService};
use serde::Serialize;
use std::io::Read;
use std::process::ExitCode;

/// Add command.
pub fn cmd_add(config: &MemologConfig, text: Option<String>, from_stdin: bool) -> CommandResult {
    let text = if from_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        text.unwrap_or_default()
    };

    let service = PublishService::from_config(config);
    let entry = service.add_memo(&text)?;
    let position = service.pending()?.len();

    println!("Memo added as #{position}: {}", entry.headline());
    Ok(ExitCode::SUCCESS)
}

/// Pending memo as shown by `list --format json`.
#[derive(Serialize)]
struct ListedMemo<'a> {
    index: usize,
    text: &'a str,
}

/// List command.
pub fn cmd_list(config: &MemologConfig, format: OutputFormat) -> CommandResult {
    let entries = PublishService::from_config(config).pending()?;

    match format {
        OutputFormat::Json => {
            let listed: Vec<ListedMemo<'_>> = entries
                .iter()
                .enumerate()
                .map(|(i, e)| ListedMemo {
                    index: i + 1,
                    text: e.as_str(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        },
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No pending memos.");
            }
            for (i, entry) in entries.iter().enumerate() {
                let mut lines = entry.as_str().lines();
                println!("{:>3}. {}", i + 1, lines.next().unwrap_or_default());
                for line in lines {
                    println!("     {line}");
                }
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// Publish command.
pub fn cmd_publish(
    config: &MemologConfig,
    text: Option<String>,
    index: Option<usize>,
    title: &str,
    slug: &str,
    at: Option<String>,
) -> CommandResult {
    let mut request = MoveRequest::new(selector(text, index)?, title, slug)?;
    if let Some(at) = at {
        let completed_at = NaiveDateTime::parse_from_str(at.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| format!("invalid --at '{at}' (expected YYYY-MM-DD HH:MM:SS): {e}"))?;
        request = request.at(completed_at);
    }

    match PublishService::from_config(config).move_to_done(request)? {
        MoveOutcome::Moved(record) => {
            println!("Memo moved to done log:");
            print_record(&record);
            Ok(ExitCode::SUCCESS)
        },
        MoveOutcome::NotFound => {
            eprintln!("Memo not found in pending list; nothing changed.");
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Discard command.
pub fn cmd_discard(
    config: &MemologConfig,
    text: Option<String>,
    index: Option<usize>,
) -> CommandResult {
    let selector = selector(text, index)?;

    match PublishService::from_config(config).discard(&selector)? {
        Some(entry) => {
            println!("Memo discarded: {}", entry.headline());
            Ok(ExitCode::SUCCESS)
        },
        None => {
            eprintln!("Memo not found in pending list; nothing changed.");
            Ok(ExitCode::FAILURE)
        },
    }
}

/// Log command.
pub fn cmd_log(config: &MemologConfig, format: OutputFormat, slug: Option<String>) -> CommandResult {
    let service = PublishService::from_config(config);

    let records = match slug {
        Some(slug) => {
            let slug = ArticleSlug::lookup(&slug)?;
            service.find_by_slug(&slug)?.into_iter().collect()
        },
        None => service.done_records()?,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No published articles.");
            }
            for (i, record) in records.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_record(record);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

/// Status command.
pub fn cmd_status(config: &MemologConfig) -> CommandResult {
    let status = PublishService::from_config(config).status()?;

    println!("Memolog Status");
    println!("==============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Pending memos: {}", status.pending);
    println!("  Path: {}", config.pending_path().display());
    println!("Published articles: {}", status.done);
    println!("  Path: {}", config.done_path().display());

    if let Some(last) = status.last_published {
        println!();
        println!(
            "Last published: {} ({}) at {}",
            last.title(),
            last.slug(),
            last.completed_at().format(TIMESTAMP_FORMAT)
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn print_record(record: &DoneRecord) {
    println!("  Title: {}", record.title());
    println!("  Slug: {}", record.slug());
    println!(
        "  Completed: {}",
        record.completed_at().format(TIMESTAMP_FORMAT)
    );
    println!("  Memo:");
    for line in record.memo().lines() {
        println!("    {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> MemologConfig {
        MemologConfig::new().with_data_dir(dir.path())
    }

    fn is_failure(code: ExitCode) -> bool {
        format!("{code:?}") == format!("{:?}", ExitCode::FAILURE)
    }

    fn seed(dir: &TempDir) -> (Vec<u8>, Vec<u8>) {
        let config = config_in(dir);
        cmd_add(&config, Some("published memo".to_string()), false).unwrap();
        cmd_publish(
            &config,
            None,
            Some(1),
            "Published",
            "published-article-slug",
            Some("2025-01-15 10:30:00".to_string()),
        )
        .unwrap();
        cmd_add(&config, Some("still pending".to_string()), false).unwrap();

        (
            fs::read(config.pending_path()).unwrap(),
            fs::read(config.done_path()).unwrap(),
        )
    }

    #[test]
    fn test_publish_missing_memo_exits_with_failure() {
        let dir = TempDir::new().unwrap();
        let (pending, done) = seed(&dir);
        let config = config_in(&dir);

        let code = cmd_publish(
            &config,
            Some("never written".to_string()),
            None,
            "Missing",
            "missing-article-slug",
            None,
        )
        .unwrap();

        assert!(is_failure(code));
        assert_eq!(fs::read(config.pending_path()).unwrap(), pending);
        assert_eq!(fs::read(config.done_path()).unwrap(), done);
    }

    #[test]
    fn test_discard_missing_memo_exits_with_failure() {
        let dir = TempDir::new().unwrap();
        let (pending, done) = seed(&dir);
        let config = config_in(&dir);

        let code = cmd_discard(&config, None, Some(7)).unwrap();

        assert!(is_failure(code));
        assert_eq!(fs::read(config.pending_path()).unwrap(), pending);
        assert_eq!(fs::read(config.done_path()).unwrap(), done);
    }

    #[test]
    fn test_log_finds_legacy_short_slug() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(
            config.done_path(),
            "===== 2024-12-01 09:00:00 =====\n\
             記事タイトル: 古い記事\n\
             記事slug: old\n\
             元のメモ:\n\
             memo\n\
             ====================\n",
        )
        .unwrap();

        let code = cmd_log(&config, OutputFormat::Text, Some("old".to_string())).unwrap();

        assert!(!is_failure(code));
    }
}
