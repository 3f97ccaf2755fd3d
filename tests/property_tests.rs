//! Property-based tests for the ledger files.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Appended memos read back in order
//! - A move removes exactly the chosen memo and records it verbatim
//! - Removing a memo keeps every other memo

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use memolog::{
    DoneLog, FixedClock, MemoEntry, MemoSelector, MemoStore, MoveOutcome, MoveRequest,
    PendingStore, PublishService,
};
use proptest::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

/// A memo of one to four non-blank lines, mixing ASCII and Japanese.
fn memo_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Zあ-ん0-9#-][a-zA-Zあ-ん0-9 _./-]{0,24}", 1..4)
        .prop_map(|lines| lines.join("\n"))
}

fn service_in(dir: &TempDir) -> PublishService {
    let at = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    PublishService::new(
        Arc::new(PendingStore::new(dir.path().join("pending.txt"))),
        Arc::new(DoneLog::new(dir.path().join("done.txt"))),
    )
    .with_clock(Arc::new(FixedClock(at)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: memos read back in append order with identical text.
    #[test]
    fn prop_append_then_entries_roundtrip(memos in prop::collection::vec(memo_text(), 0..8)) {
        let dir = TempDir::new().unwrap();
        let store = PendingStore::new(dir.path().join("pending.txt"));

        for memo in &memos {
            store.append(&MemoEntry::parse(memo).unwrap()).unwrap();
        }

        let read: Vec<String> = store
            .entries()
            .unwrap()
            .into_iter()
            .map(MemoEntry::into_string)
            .collect();
        prop_assert_eq!(read, memos);
    }

    /// Property: a move removes exactly one pending memo and records it verbatim once.
    #[test]
    fn prop_move_transfers_exactly_one(
        memos in prop::collection::vec(memo_text(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        for memo in &memos {
            service.add_memo(memo).unwrap();
        }
        let idx = pick.index(memos.len());

        let request = MoveRequest::new(
            MemoSelector::Index(idx + 1),
            "Property title",
            "property-article-slug",
        ).unwrap();
        let outcome = service.move_to_done(request).unwrap();
        let is_moved = matches!(outcome, MoveOutcome::Moved(_));
        prop_assert!(is_moved);

        let mut expected = memos.clone();
        let moved = expected.remove(idx);

        let pending: Vec<String> = service
            .pending()
            .unwrap()
            .into_iter()
            .map(MemoEntry::into_string)
            .collect();
        prop_assert_eq!(pending, expected);

        let records = service.done_records().unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].memo(), moved.as_str());
    }

    /// Property: removing a memo that is not present never rewrites the file.
    #[test]
    fn prop_remove_missing_is_noop(
        memos in prop::collection::vec(memo_text(), 0..6),
        missing in memo_text(),
    ) {
        prop_assume!(!memos.contains(&missing));
        let dir = TempDir::new().unwrap();
        let store = PendingStore::new(dir.path().join("pending.txt"));
        for memo in &memos {
            store.append(&MemoEntry::parse(memo).unwrap()).unwrap();
        }
        let before = std::fs::read(store.path()).ok();

        let removed = store.remove(&MemoEntry::parse(&missing).unwrap()).unwrap();

        prop_assert!(!removed);
        prop_assert_eq!(std::fs::read(store.path()).ok(), before);
    }
}
