//! Pending memo entries.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// One unpublished article idea.
///
/// An entry is a block of non-blank lines. Its canonical text has `\r\n`
/// normalised to `\n` and no leading or trailing blank lines; everything else
/// (including trailing spaces on a line) is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MemoEntry(String);

impl MemoEntry {
    /// Parses memo text supplied by the user.
    ///
    /// Surrounding blank lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the text is blank, or if it contains
    /// a blank line (which would split it into two entries in the pending file).
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.iter().position(|l| !is_blank(l));
        let last = lines.iter().rposition(|l| !is_blank(l));

        let (Some(first), Some(last)) = (first, last) else {
            return Err(Error::InvalidInput("memo cannot be empty".to_string()));
        };

        let body = &lines[first..=last];
        if body.iter().any(|l| is_blank(l)) {
            return Err(Error::InvalidInput(
                "memo cannot contain blank lines; blank lines separate entries".to_string(),
            ));
        }

        Ok(Self::from_block(body))
    }

    /// Builds an entry from lines already known to be non-blank.
    pub(crate) fn from_block<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(|l| l.as_ref().trim_end_matches(['\n', '\r']))
            .collect::<Vec<_>>()
            .join("\n");
        Self(text)
    }

    /// Returns the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first line, used as a short label in listings.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.0.lines().next().unwrap_or_default()
    }

    /// Consumes the entry and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MemoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a line counts as a separator in the pending file.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
