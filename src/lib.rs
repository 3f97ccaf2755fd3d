//! # Memolog
//!
//! A plain-text ledger for blog article ideas.
//!
//! Memolog keeps two human-editable files side by side: a pending list of
//! article memos and an append-only done log. Publishing an article moves its
//! memo from the first file into a record in the second.
//!
//! ## Example
//!
//! ```rust,ignore
//! use memolog::{MemoSelector, MoveRequest, PublishService};
//!
//! let service = PublishService::from_config(&config);
//! service.add_memo("Write about Python project layout")?;
//! let outcome = service.move_to_done(MoveRequest::new(
//!     MemoSelector::Index(1),
//!     "Pythonプロジェクトのディレクトリ構造設計",
//!     "python-project-directory-structure",
//! )?)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::MemologConfig;
pub use models::{ArticleSlug, ArticleTitle, DoneRecord, MemoEntry};
pub use services::{
    Clock, FixedClock, LedgerStatus, MemoSelector, MoveOutcome, MoveRequest, PublishService,
    SystemClock,
};
pub use storage::{DoneLog, MemoStore, PendingStore, RecordLog};

/// Error type for memolog operations.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty memo, bad slug or title, slug already published |
/// | `OperationFailed` | I/O errors, config parse errors, logging init errors |
/// | `Corrupt` | A done log block cannot be parsed |
///
/// A memo that is not in the pending list is not an error. Lookups report it
/// through `Option`, `bool`, or [`MoveOutcome::NotFound`].
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The done log contains a block that does not follow the record format.
    #[error("done log is corrupt at line {line}: {reason}")]
    Corrupt {
        /// 1-based line number where parsing stopped.
        line: usize,
        /// What was expected there.
        reason: String,
    },
}

impl Error {
    /// Builds an `OperationFailed` error from any displayable cause.
    pub fn failed(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for memolog operations.
pub type Result<T> = std::result::Result<T, Error>;
