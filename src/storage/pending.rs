//! Pending memo file.
//!
//! Entries are runs of non-blank lines separated by blank lines. Removing an
//! entry splices it out of the raw text so everything else in the file keeps
//! its exact bytes.

use super::{MemoStore, ensure_parent, read_optional, write_atomic};
use crate::models::{MemoEntry, is_blank};
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File-backed pending memo store.
#[derive(Debug, Clone)]
pub struct PendingStore {
    path: PathBuf,
}

/// An entry and the byte range its lines occupy in the file.
#[derive(Debug)]
struct Block {
    start: usize,
    end: usize,
    entry: MemoEntry,
}

impl PendingStore {
    /// Creates a store for the given file. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoStore for PendingStore {
    #[instrument(skip(self, entry), fields(path = %self.path.display(), headline = entry.headline()))]
    fn append(&self, entry: &MemoEntry) -> Result<()> {
        let existing = read_optional(&self.path)?;
        let separator = separator_for(&existing);

        ensure_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::failed("open_pending_file", format!("{}: {e}", self.path.display())))?;

        writeln!(file, "{separator}{entry}")
            .and_then(|()| file.flush())
            .map_err(|e| Error::failed("append_pending_memo", e))?;

        tracing::debug!("Appended memo to pending store");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<MemoEntry>> {
        let text = read_optional(&self.path)?;
        Ok(scan(&text).into_iter().map(|b| b.entry).collect())
    }

    #[instrument(skip(self, entry), fields(path = %self.path.display(), headline = entry.headline()))]
    fn remove(&self, entry: &MemoEntry) -> Result<bool> {
        let text = read_optional(&self.path)?;
        let blocks = scan(&text);

        let Some(idx) = blocks.iter().position(|b| &b.entry == entry) else {
            tracing::debug!("Memo not found in pending store");
            return Ok(false);
        };

        let remaining = splice_out(&text, &blocks, idx);
        write_atomic(&self.path, &remaining)?;

        tracing::debug!(remaining = blocks.len() - 1, "Removed memo from pending store");
        Ok(true)
    }
}

/// Splits the file into entry blocks.
fn scan(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<(usize, Vec<&str>)> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if is_blank(line) {
            if let Some((start, lines)) = current.take() {
                blocks.push(Block {
                    start,
                    end: line_start,
                    entry: MemoEntry::from_block(&lines),
                });
            }
        } else {
            current
                .get_or_insert_with(|| (line_start, Vec::new()))
                .1
                .push(line);
        }
    }

    if let Some((start, lines)) = current {
        blocks.push(Block {
            start,
            end: text.len(),
            entry: MemoEntry::from_block(&lines),
        });
    }

    blocks
}

/// Returns `text` without block `idx` and the separator that belonged to it.
///
/// A block takes the blank lines after it; the last block takes the ones
/// before it, so the file never ends with a dangling separator.
fn splice_out(text: &str, blocks: &[Block], idx: usize) -> String {
    let block = &blocks[idx];
    let next = blocks.get(idx + 1);
    let prev = idx.checked_sub(1).and_then(|p| blocks.get(p));

    let (cut_start, cut_end) = match (next, prev) {
        (Some(next), _) => (block.start, next.start),
        (None, Some(prev)) => (prev.end, text.len()),
        (None, None) => (block.start, text.len()),
    };

    let mut out = String::with_capacity(text.len() - (cut_end - cut_start));
    out.push_str(&text[..cut_start]);
    out.push_str(&text[cut_end..]);

    if out.trim().is_empty() {
        out.clear();
    }
    out
}

/// What to write before a new entry so it starts after exactly one blank line.
fn separator_for(existing: &str) -> &'static str {
    if existing.is_empty() {
        return "";
    }
    let terminated = existing.ends_with('\n');
    let body = existing.strip_suffix('\n').unwrap_or(existing);
    let last_line = body.rsplit('\n').next().unwrap_or(body);

    match (terminated, is_blank(last_line)) {
        (true, true) => "",
        (true, false) | (false, true) => "\n",
        (false, false) => "\n\n",
    }
}
