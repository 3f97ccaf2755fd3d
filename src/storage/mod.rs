//! Plain-text storage for the pending list and the done log.
//!
//! Both files are meant to stay readable and editable by hand, so neither
//! backend adds metadata of its own.

mod done_log;
mod pending;
mod traits;

pub use done_log::{DoneLog, parse_records};
pub use pending::PendingStore;
pub use traits::{AppendReceipt, MemoStore, RecordLog};

use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Reads a text file, treating a missing file as empty.
pub(crate) fn read_optional(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(Error::failed(
            "read_ledger_file",
            format!("{}: {e}", path.display()),
        )),
    }
}

/// Creates the parent directory of `path` if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .map_err(|e| Error::failed("create_ledger_dir", format!("{}: {e}", parent.display()))),
        _ => Ok(()),
    }
}

/// Replaces a file's contents through a sibling temp file and a rename.
///
/// The temp file is synced before the rename and removed if any step fails.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);

    let written = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        })
        .map_err(|e| Error::failed("write_ledger_file", format!("{}: {e}", tmp.display())))
        .and_then(|()| {
            fs::rename(&tmp, path).map_err(|e| {
                Error::failed("replace_ledger_file", format!("{}: {e}", path.display()))
            })
        });

    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
