//! Archive path validation and path helpers.

use std::{
    io,
    path::{Component, Path, PathBuf},
};

use crate::error::{Error, Result};

/// The only archive extension accepted, compared case-insensitively.
pub const ARCHIVE_EXTENSION: &str = ".zst";

/// Whether `name` ends with [`ARCHIVE_EXTENSION`], ignoring ASCII case.
pub fn has_archive_extension(name: &str) -> bool {
    let ext_len = ARCHIVE_EXTENSION.len();
    name.len() >= ext_len
        && name.is_char_boundary(name.len() - ext_len)
        && name[name.len() - ext_len..].eq_ignore_ascii_case(ARCHIVE_EXTENSION)
}

/// Fails unless the file name of `path` carries the archive extension.
///
/// This never touches the filesystem and must run before any other check.
///
/// # Errors
///
/// Returns an invalid extension error if the name does not end with `.zst`, or if `path` has no
/// file name at all.
pub fn ensure_archive_extension(path: &Path) -> Result<()> {
    match path.file_name() {
        Some(name) if has_archive_extension(&name.to_string_lossy()) => Ok(()),
        _ => Err(Error::invalid_extension(path)),
    }
}

/// Fails if the source to compress does not exist.
///
/// # Errors
///
/// Returns a not found error naming the source.
pub fn ensure_source_exists(path: &Path) -> Result<()> {
    ensure_exists("source", path)
}

/// Fails if the archive to extract does not exist.
///
/// # Errors
///
/// Returns a not found error naming the archive.
pub fn ensure_archive_exists(path: &Path) -> Result<()> {
    ensure_exists("archive", path)
}

fn ensure_exists(role: &'static str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::not_found(role, path))
    }
}

/// Removes a trailing `.zst` from `name`, any other name is returned as is.
pub fn strip_archive_suffix(name: &str) -> &str {
    if has_archive_extension(name) {
        &name[..name.len() - ARCHIVE_EXTENSION.len()]
    } else {
        name
    }
}

/// Makes `path` absolute and folds `.` and `..` components lexically.
///
/// Symlinks are not resolved, so `link/..` becomes the directory containing `link`.
///
/// # Errors
///
/// Fails if the current directory cannot be determined or `path` is empty.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    let abs = std::path::absolute(path)?;
    let mut folded = PathBuf::new();

    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other),
        }
    }

    Ok(folded)
}
