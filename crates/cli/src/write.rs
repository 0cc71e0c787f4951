// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded artifact writes.
//!
//! Every artifact (JSON batch, workbook, text summary) is written on a worker
//! thread and awaited with a deadline, so a stalled filesystem surfaces as a
//! reported [`Error::WriteTimeout`] instead of hanging the run.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded};

use crate::error::{Error, Result};

/// Default limit for a single artifact write.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a blocking write on a worker thread, waiting at most `timeout`.
///
/// `path` is only used for error reporting. A worker that outlives the
/// deadline is detached; its eventual result is discarded.
pub fn with_timeout<T, F>(path: &Path, timeout: Duration, write: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    thread::Builder::new()
        .name("artifact-writer".to_string())
        .spawn(move || {
            // Receiver is gone after a timeout; nothing left to report to.
            let _ = tx.send(write());
        })
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        }),
        Err(RecvTimeoutError::Timeout) => Err(Error::WriteTimeout {
            path: path.to_path_buf(),
            timeout,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(Error::Internal(format!(
            "writer thread for {} exited without a result",
            path.display()
        ))),
    }
}

/// Run `fill` against a freshly created `path`, removing the file if it fails.
fn fill_or_remove(path: &Path, fill: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    fill().inspect_err(|_| {
        // Cleanup failure is ignored; the fill error is returned.
        let _ = fs::remove_file(path);
    })
}

/// Hidden sibling used to stage a replacement for `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".partial");
    path.with_file_name(name)
}

/// Replace `path` with `contents`.
///
/// The bytes go to a sibling staging file that is renamed over `path`, so a
/// failed write leaves any previous file untouched and no partial file behind.
pub fn write_file(path: &Path, contents: Vec<u8>, timeout: Duration) -> Result<()> {
    let target = path.to_path_buf();
    with_timeout(path, timeout, move || {
        let staging = staging_path(&target);
        fill_or_remove(&staging, || {
            fs::write(&staging, &contents)?;
            fs::rename(&staging, &target)
        })
    })
}

/// Create a new file `<dir>/<stem>.<ext>` that never replaces an existing one.
///
/// On a name collision a monotonic disambiguator is appended to the stem
/// (`<stem>-1.<ext>`, `<stem>-2.<ext>`, ...). Returns the path written. A file
/// that cannot be fully written is removed again.
pub fn write_new_file(
    dir: &Path,
    stem: &str,
    ext: &str,
    contents: Vec<u8>,
    timeout: Duration,
) -> Result<PathBuf> {
    let dir_owned = dir.to_path_buf();
    let stem = stem.to_string();
    let ext = ext.to_string();
    with_timeout(dir, timeout, move || {
        fs::create_dir_all(&dir_owned)?;
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{stem}.{ext}")
            } else {
                format!("{stem}-{attempt}.{ext}")
            };
            let path = dir_owned.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    fill_or_remove(&path, || {
                        file.write_all(&contents)?;
                        file.sync_all()
                    })?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e),
            }
        }
    })
}

#[cfg(test)]
#[path = "write_tests.rs"]
mod tests;
