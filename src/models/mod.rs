//! Data models for memolog.
//!
//! This module contains the values that flow between the two ledger files.

mod article;
mod memo;
mod record;

pub use article::{ArticleSlug, ArticleTitle};
pub use memo::MemoEntry;
pub(crate) use memo::is_blank;
pub use record::{
    DoneRecord, FOOTER, HEADER_MARKER, MEMO_LABEL, SLUG_LABEL, TIMESTAMP_FORMAT, TITLE_LABEL,
};
