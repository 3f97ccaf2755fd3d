//! Storage traits for the two ledgers.

use crate::models::{ArticleSlug, DoneRecord, MemoEntry};
use crate::{Error, Result};

/// Ordered store of unpublished memos.
///
/// Mutations come from a single actor; implementations do no locking.
pub trait MemoStore: Send + Sync {
    /// Appends a memo after the existing entries.
    fn append(&self, entry: &MemoEntry) -> Result<()>;

    /// Returns all entries in order.
    fn entries(&self) -> Result<Vec<MemoEntry>>;

    /// Removes the first entry equal to `entry`.
    ///
    /// Returns `false`, without writing anything, when no entry matches.
    fn remove(&self, entry: &MemoEntry) -> Result<bool>;

    /// Returns the entry at a 1-based position.
    fn get(&self, index: usize) -> Result<Option<MemoEntry>> {
        if index == 0 {
            return Err(Error::InvalidInput(
                "memo positions start at 1".to_string(),
            ));
        }
        Ok(self.entries()?.into_iter().nth(index - 1))
    }

    /// Checks whether an equal entry is present.
    fn contains(&self, entry: &MemoEntry) -> Result<bool> {
        Ok(self.entries()?.iter().any(|e| e == entry))
    }

    /// Returns the number of entries.
    fn count(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }
}

/// Position of one append in a record log, used to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendReceipt {
    offset: u64,
    len: u64,
}

impl AppendReceipt {
    /// Creates a receipt for `len` bytes written at `offset`.
    #[must_use]
    pub const fn new(offset: u64, len: u64) -> Self {
        Self { offset, len }
    }

    /// Log length before the append.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Log length right after the append.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.offset + self.len
    }
}

/// Append-only log of published articles.
pub trait RecordLog: Send + Sync {
    /// Appends a record after all existing ones.
    fn append(&self, record: &DoneRecord) -> Result<AppendReceipt>;

    /// Reads every record in order.
    fn records(&self) -> Result<Vec<DoneRecord>>;

    /// Undoes the most recent append of the current operation.
    ///
    /// Only valid while nothing else has been written after `receipt`;
    /// earlier records are never touched.
    fn revert(&self, receipt: AppendReceipt) -> Result<()>;

    /// Finds the record for a slug.
    fn find_by_slug(&self, slug: &ArticleSlug) -> Result<Option<DoneRecord>> {
        Ok(self.records()?.into_iter().find(|r| r.slug() == slug))
    }

    /// Returns the number of records.
    fn count(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }
}
