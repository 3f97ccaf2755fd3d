//! Done log file.
//!
//! Records are appended as fixed blocks:
//!
//! ```text
//! ===== 2025-01-15 10:30:00 =====
//! 記事タイトル: <title>
//! 記事slug: <slug>
//! 元のメモ:
//! <verbatim memo text>
//! ====================
//! ```
//!
//! Blocks are separated by one blank line. The file is only ever opened in
//! append mode, except to undo an append made by the same move.

use super::{AppendReceipt, RecordLog, ensure_parent, read_optional};
use crate::models::{
    ArticleSlug, ArticleTitle, DoneRecord, FOOTER, HEADER_MARKER, MEMO_LABEL, SLUG_LABEL,
    TIMESTAMP_FORMAT, TITLE_LABEL, is_blank,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File-backed done log.
#[derive(Debug, Clone)]
pub struct DoneLog {
    path: PathBuf,
}

impl DoneLog {
    /// Creates a log for the given file. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, operation: &str, e: &std::io::Error) -> Error {
        Error::failed(operation, format!("{}: {e}", self.path.display()))
    }
}

impl RecordLog for DoneLog {
    #[instrument(skip(self, record), fields(path = %self.path.display(), slug = %record.slug()))]
    fn append(&self, record: &DoneRecord) -> Result<AppendReceipt> {
        if record.memo().lines().any(|line| line == FOOTER) {
            return Err(Error::InvalidInput(format!(
                "memo contains the record footer line '{FOOTER}'"
            )));
        }

        ensure_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open_done_log", &e))?;

        let offset = file
            .metadata()
            .map_err(|e| self.io_error("stat_done_log", &e))?
            .len();

        let separator = if offset == 0 {
            ""
        } else {
            let mut last = [0_u8; 1];
            file.seek(SeekFrom::End(-1))
                .and_then(|_| file.read_exact(&mut last))
                .map_err(|e| self.io_error("read_done_log_tail", &e))?;
            if last[0] == b'\n' { "\n" } else { "\n\n" }
        };

        let block = format!("{separator}{}", record.render());
        write_or_rollback(&mut file, block.as_bytes(), |f| f.set_len(offset))
            .map_err(|e| self.io_error("append_done_record", &e))?;

        let len = u64::try_from(block.len()).unwrap_or(u64::MAX);
        tracing::debug!(offset, len, "Appended done record");
        Ok(AppendReceipt::new(offset, len))
    }

    fn records(&self) -> Result<Vec<DoneRecord>> {
        parse_records(&read_optional(&self.path)?)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn revert(&self, receipt: AppendReceipt) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open_done_log", &e))?;

        let len = file
            .metadata()
            .map_err(|e| self.io_error("stat_done_log", &e))?
            .len();
        if len != receipt.end() {
            return Err(Error::failed(
                "revert_done_record",
                format!(
                    "done log is {len} bytes, expected {} right after the append",
                    receipt.end()
                ),
            ));
        }

        file.set_len(receipt.offset())
            .map_err(|e| self.io_error("truncate_done_log", &e))?;

        tracing::warn!(offset = receipt.offset(), "Reverted done record append");
        Ok(())
    }
}

/// Writes `bytes` in full, calling `rollback` if the write or flush fails.
///
/// The write error is returned either way. A failed rollback is logged, since
/// the log may then end in a partial block.
fn write_or_rollback<W, F>(out: &mut W, bytes: &[u8], rollback: F) -> std::io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W) -> std::io::Result<()>,
{
    let Err(e) = out.write_all(bytes).and_then(|()| out.flush()) else {
        return Ok(());
    };
    if let Err(rollback_err) = rollback(out) {
        tracing::error!(
            error = %e,
            rollback_error = %rollback_err,
            "Failed to undo partial done record write"
        );
    }
    Err(e)
}

/// Parses every record block in a done log.
///
/// # Errors
///
/// Returns [`Error::Corrupt`] at the first line that does not fit the block format.
pub fn parse_records(text: &str) -> Result<Vec<DoneRecord>> {
    let mut records = Vec::new();
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    while let Some((header_no, header)) = lines.next() {
        if is_blank(header) {
            continue;
        }
        let completed_at = parse_header(header_no, header)?;

        let (no, line) = next_line(&mut lines, header_no, "title line")?;
        let title = field(no, line, TITLE_LABEL)?;

        let (no, line) = next_line(&mut lines, no, "slug line")?;
        let slug = field(no, line, SLUG_LABEL)?;

        let (no, line) = next_line(&mut lines, no, "memo line")?;
        if line.trim_end() != MEMO_LABEL {
            return Err(corrupt(no, format!("expected '{MEMO_LABEL}'")));
        }

        let mut memo = Vec::new();
        loop {
            match lines.next() {
                Some((_, line)) if line == FOOTER => break,
                Some((_, line)) => memo.push(line),
                None => {
                    return Err(corrupt(
                        header_no,
                        "record has no closing footer".to_string(),
                    ));
                },
            }
        }

        records.push(DoneRecord::from_parts(
            completed_at,
            ArticleTitle::from_log(title),
            ArticleSlug::from_log(slug),
            memo.join("\n"),
        ));
    }

    Ok(records)
}

fn parse_header(no: usize, line: &str) -> Result<NaiveDateTime> {
    let ts = line
        .strip_prefix(HEADER_MARKER)
        .and_then(|rest| rest.strip_suffix(HEADER_MARKER))
        .map(str::trim)
        .ok_or_else(|| corrupt(no, "expected a '===== <timestamp> =====' header".to_string()))?;

    NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
        .map_err(|e| corrupt(no, format!("invalid timestamp '{ts}': {e}")))
}

fn field<'a>(no: usize, line: &'a str, label: &str) -> Result<&'a str> {
    let label = label.trim_end();
    line.strip_prefix(label)
        .map(str::trim)
        .ok_or_else(|| corrupt(no, format!("expected '{label}'")))
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    prev: usize,
    what: &str,
) -> Result<(usize, &'a str)> {
    lines
        .next()
        .ok_or_else(|| corrupt(prev + 1, format!("unexpected end of file, expected {what}")))
}

fn corrupt(line: usize, reason: String) -> Error {
    Error::Corrupt { line, reason }
}
