//! Publication service.
//!
//! Moves a memo from the pending list into the done log. The move is the only
//! state transition in the ledger and it happens at most once per memo.

use super::{Clock, SystemClock};
use crate::config::MemologConfig;
use crate::models::{ArticleSlug, ArticleTitle, DoneRecord, MemoEntry};
use crate::storage::{DoneLog, MemoStore, PendingStore, RecordLog};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::instrument;

/// How the caller points at a pending memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoSelector {
    /// The memo's exact text.
    Text(String),
    /// 1-based position in the pending list.
    Index(usize),
}

/// A request to move one memo to the done log.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    /// Which memo to move.
    pub selector: MemoSelector,
    /// Title of the published article.
    pub title: ArticleTitle,
    /// Slug of the published article.
    pub slug: ArticleSlug,
    /// Publication time; the service clock is used when absent.
    pub completed_at: Option<NaiveDateTime>,
}

impl MoveRequest {
    /// Builds a request, validating title and slug.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the title or slug is invalid.
    pub fn new(selector: MemoSelector, title: &str, slug: &str) -> Result<Self> {
        Ok(Self {
            selector,
            title: ArticleTitle::new(title)?,
            slug: ArticleSlug::new(slug)?,
            completed_at: None,
        })
    }

    /// Pins the publication time.
    #[must_use]
    pub const fn at(mut self, completed_at: NaiveDateTime) -> Self {
        self.completed_at = Some(completed_at);
        self
    }
}

/// Result of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The memo was recorded as done and removed from the pending list.
    Moved(DoneRecord),
    /// No such memo was pending; neither file was touched.
    NotFound,
}

/// Counts across both ledgers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerStatus {
    /// Number of pending memos.
    pub pending: usize,
    /// Number of done records.
    pub done: usize,
    /// Most recently appended record.
    pub last_published: Option<DoneRecord>,
}

/// Service that owns both ledgers.
pub struct PublishService {
    pending: Arc<dyn MemoStore>,
    done: Arc<dyn RecordLog>,
    clock: Arc<dyn Clock>,
}

impl PublishService {
    /// Creates a service over the given stores, stamping records with the system clock.
    #[must_use]
    pub fn new(pending: Arc<dyn MemoStore>, done: Arc<dyn RecordLog>) -> Self {
        Self {
            pending,
            done,
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a service over the files named in the configuration.
    #[must_use]
    pub fn from_config(config: &MemologConfig) -> Self {
        Self::new(
            Arc::new(PendingStore::new(config.pending_path())),
            Arc::new(DoneLog::new(config.done_path())),
        )
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Appends a new memo to the pending list.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid memo or the write fails.
    pub fn add_memo(&self, text: &str) -> Result<MemoEntry> {
        let entry = MemoEntry::parse(text)?;
        self.pending.append(&entry)?;
        tracing::info!(headline = entry.headline(), "Memo added");
        Ok(entry)
    }

    /// Returns the pending memos in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the pending file cannot be read.
    pub fn pending(&self) -> Result<Vec<MemoEntry>> {
        self.pending.entries()
    }

    /// Returns the done records in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the done log cannot be read or parsed.
    pub fn done_records(&self) -> Result<Vec<DoneRecord>> {
        self.done.records()
    }

    /// Looks up the done record for a slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the done log cannot be read or parsed.
    pub fn find_by_slug(&self, slug: &ArticleSlug) -> Result<Option<DoneRecord>> {
        self.done.find_by_slug(slug)
    }

    /// Moves a pending memo to the done log.
    ///
    /// The record is appended first and the memo removed second. If the
    /// removal fails the append is undone, so a memo is never both pending
    /// and done, and never dropped without a record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The slug already has a done record
    /// - The memo cannot be written in the done log format
    /// - Either file cannot be read or written
    #[instrument(skip(self, request), fields(slug = %request.slug))]
    pub fn move_to_done(&self, request: MoveRequest) -> Result<MoveOutcome> {
        let Some(entry) = self.resolve(&request.selector)? else {
            tracing::info!("Memo not pending, nothing moved");
            return Ok(MoveOutcome::NotFound);
        };

        if self.done.find_by_slug(&request.slug)?.is_some() {
            return Err(Error::InvalidInput(format!(
                "slug '{}' is already in the done log",
                request.slug
            )));
        }

        let completed_at = request.completed_at.unwrap_or_else(|| self.clock.now());
        let record = DoneRecord::new(completed_at, request.title, request.slug, &entry);
        let receipt = self.done.append(&record)?;

        match self.pending.remove(&entry) {
            Ok(true) => {
                tracing::info!(headline = entry.headline(), "Memo moved to done log");
                Ok(MoveOutcome::Moved(record))
            },
            Ok(false) => {
                self.done.revert(receipt)?;
                tracing::warn!("Memo vanished from pending store during move");
                Ok(MoveOutcome::NotFound)
            },
            Err(e) => {
                if let Err(revert_err) = self.done.revert(receipt) {
                    tracing::error!(error = %revert_err, "Failed to revert done record");
                    return Err(Error::failed(
                        "move_to_done",
                        format!("{e}; additionally the done record could not be reverted: {revert_err}"),
                    ));
                }
                Err(e)
            },
        }
    }

    /// Drops a pending memo without recording it as done.
    ///
    /// Returns the removed memo, or `None` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the pending file cannot be read or written.
    #[instrument(skip(self))]
    pub fn discard(&self, selector: &MemoSelector) -> Result<Option<MemoEntry>> {
        let Some(entry) = self.resolve(selector)? else {
            return Ok(None);
        };
        if self.pending.remove(&entry)? {
            tracing::info!(headline = entry.headline(), "Memo discarded");
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    /// Summarises both ledgers.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed.
    pub fn status(&self) -> Result<LedgerStatus> {
        let pending = self.pending.count()?;
        let mut records = self.done.records()?;
        Ok(LedgerStatus {
            pending,
            done: records.len(),
            last_published: records.pop(),
        })
    }

    fn resolve(&self, selector: &MemoSelector) -> Result<Option<MemoEntry>> {
        match selector {
            MemoSelector::Index(index) => self.pending.get(*index),
            MemoSelector::Text(text) => {
                let wanted = MemoEntry::parse(text)?;
                Ok(self.pending.contains(&wanted)?.then_some(wanted))
            },
        }
    }
}
