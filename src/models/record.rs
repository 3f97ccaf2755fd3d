//! Done log records.

use super::{ArticleSlug, ArticleTitle, MemoEntry};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

/// Timestamp format used in record headers, e.g. `2025-01-15 10:30:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix and suffix around the timestamp in a record header.
pub const HEADER_MARKER: &str = "=====";

/// Closing line of every record.
pub const FOOTER: &str = "====================";

/// Field label for the article title.
pub const TITLE_LABEL: &str = "記事タイトル: ";

/// Field label for the article slug.
pub const SLUG_LABEL: &str = "記事slug: ";

/// Line introducing the verbatim memo text.
pub const MEMO_LABEL: &str = "元のメモ:";

/// Immutable record of a published article.
///
/// Fields are read-only once built; the done log never rewrites a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoneRecord {
    #[serde(serialize_with = "serialize_timestamp")]
    completed_at: NaiveDateTime,
    title: ArticleTitle,
    slug: ArticleSlug,
    memo: String,
}

impl DoneRecord {
    /// Creates a record for a memo that has just been published.
    #[must_use]
    pub fn new(
        completed_at: NaiveDateTime,
        title: ArticleTitle,
        slug: ArticleSlug,
        memo: &MemoEntry,
    ) -> Self {
        Self {
            completed_at,
            title,
            slug,
            memo: memo.as_str().to_string(),
        }
    }

    /// Rebuilds a record parsed from the done log.
    pub(crate) const fn from_parts(
        completed_at: NaiveDateTime,
        title: ArticleTitle,
        slug: ArticleSlug,
        memo: String,
    ) -> Self {
        Self {
            completed_at,
            title,
            slug,
            memo,
        }
    }

    /// When the article was published.
    #[must_use]
    pub const fn completed_at(&self) -> NaiveDateTime {
        self.completed_at
    }

    /// Article title.
    #[must_use]
    pub const fn title(&self) -> &ArticleTitle {
        &self.title
    }

    /// Article slug.
    #[must_use]
    pub const fn slug(&self) -> &ArticleSlug {
        &self.slug
    }

    /// The originating memo text, verbatim.
    #[must_use]
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Renders the record block, terminated by a newline.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{HEADER_MARKER} {ts} {HEADER_MARKER}\n{TITLE_LABEL}{title}\n{SLUG_LABEL}{slug}\n{MEMO_LABEL}\n{memo}\n{FOOTER}\n",
            ts = self.completed_at.format(TIMESTAMP_FORMAT),
            title = self.title,
            slug = self.slug,
            memo = self.memo,
        )
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> DoneRecord {
        let at = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        DoneRecord::new(
            at,
            ArticleTitle::new("Pythonプロジェクトのディレクトリ構造設計").unwrap(),
            ArticleSlug::new("python-project-directory-structure").unwrap(),
            &MemoEntry::parse("Write about Python project layout").unwrap(),
        )
    }

    #[test]
    fn test_render_block() {
        let expected = "===== 2025-01-15 10:30:00 =====\n\
                        記事タイトル: Pythonプロジェクトのディレクトリ構造設計\n\
                        記事slug: python-project-directory-structure\n\
                        元のメモ:\n\
                        Write about Python project layout\n\
                        ====================\n";
        assert_eq!(sample().render(), expected);
    }

    #[test]
    fn test_footer_is_twenty_equals() {
        assert_eq!(FOOTER.len(), 20);
        assert!(FOOTER.chars().all(|c| c == '='));
    }

    #[test]
    fn test_json_uses_log_timestamp_format() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["completed_at"], "2025-01-15 10:30:00");
        assert_eq!(json["slug"], "python-project-directory-structure");
        assert_eq!(json["memo"], "Write about Python project layout");
    }
}
