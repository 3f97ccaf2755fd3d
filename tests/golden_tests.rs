//! Golden tests for the on-disk formats.
//!
//! These pin the exact bytes written to both ledger files so that hand-kept
//! logs from before a change stay readable after it.

// Golden tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::NaiveDate;
use memolog::storage::parse_records;
use memolog::{FixedClock, MemoSelector, MemologConfig, MoveRequest, PublishService};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const GOLDEN_DONE_LOG: &str = "\
===== 2025-01-15 10:30:00 =====
記事タイトル: Pythonプロジェクトのディレクトリ構造設計
記事slug: python-project-directory-structure
元のメモ:
Write about Python project layout
====================

===== 2025-01-16 21:05:09 =====
記事タイトル: PyInstallerで複数GUIツールを配布する
記事slug: pyinstaller-multi-gui-tools
元のメモ:
複数のGUIツールをまとめてexe化
- specファイルを共通化
- ランチャーから起動
====================
";

fn service_in(dir: &TempDir, clock: FixedClock) -> PublishService {
    PublishService::from_config(&MemologConfig::new().with_data_dir(dir.path()))
        .with_clock(Arc::new(clock))
}

#[test]
fn test_golden_done_log_bytes() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("pending.txt"),
        "Write about Python project layout\n\n\
         複数のGUIツールをまとめてexe化\n- specファイルを共通化\n- ランチャーから起動\n",
    )
    .unwrap();

    let first_at = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    let second_at = NaiveDate::from_ymd_opt(2025, 1, 16)
        .unwrap()
        .and_hms_opt(21, 5, 9)
        .unwrap();

    service_in(&dir, FixedClock(first_at))
        .move_to_done(
            MoveRequest::new(
                MemoSelector::Index(1),
                "Pythonプロジェクトのディレクトリ構造設計",
                "python-project-directory-structure",
            )
            .unwrap(),
        )
        .unwrap();

    service_in(&dir, FixedClock(second_at))
        .move_to_done(
            MoveRequest::new(
                MemoSelector::Index(1),
                "PyInstallerで複数GUIツールを配布する",
                "pyinstaller-multi-gui-tools",
            )
            .unwrap(),
        )
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("done.txt")).unwrap(),
        GOLDEN_DONE_LOG
    );
    assert_eq!(fs::read_to_string(dir.path().join("pending.txt")).unwrap(), "");
}

#[test]
fn test_golden_done_log_parses() {
    let records = parse_records(GOLDEN_DONE_LOG).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].slug().as_str(), "python-project-directory-structure");
    assert_eq!(
        records[1].memo(),
        "複数のGUIツールをまとめてexe化\n- specファイルを共通化\n- ランチャーから起動"
    );
}

#[test]
fn test_golden_pending_file_layout() {
    let dir = TempDir::new().unwrap();
    let service = service_in(
        &dir,
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ),
    );

    service.add_memo("first idea").unwrap();
    service.add_memo("\nsecond idea\n  indented detail\n\n").unwrap();
    service.add_memo("third idea").unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("pending.txt")).unwrap(),
        "first idea\n\nsecond idea\n  indented detail\n\nthird idea\n"
    );
}
