//! This crate compresses a file or a directory into a single `.zst` archive, and extracts such
//! archives again.
//!
//! A directory becomes a tar stream compressed with zstd, a single file becomes a bare zstd
//! stream. The archive does not record which of the two it holds: [`extract`] decodes the archive
//! and attempts to read it as tar, falling back to the bare stream if that fails (see [`sniff`]).
//!
//! Zarc uses the bindings from the [zstd_safe] crate for compression and the [tar] crate for the
//! container.
//!
//! # Compression
//!
//! ```no_run
//! use std::path::Path;
//! use zarc::{ArchiveKind, EncodeOptions};
//!
//! let report = zarc::compress(Path::new("photos"), Path::new("photos.zst"), &EncodeOptions::new())?;
//! assert_eq!(report.kind, ArchiveKind::Tar);
//! # Ok::<(), zarc::Error>(())
//! ```
//!
//! # Extraction
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = zarc::extract(Path::new("photos.zst"), Path::new("restored"))?;
//! println!("{}", report.path.display());
//! # Ok::<(), zarc::Error>(())
//! ```
//!
//! [zstd_safe]: https://docs.rs/zstd-safe/latest/zstd_safe/
//! [tar]: https://docs.rs/tar/latest/tar/

use std::path::{Path, PathBuf};

mod copy;
mod decode;
mod encode;
mod error;
mod pack;
pub mod path;
mod sniff;
mod unpack;

pub use copy::{CHUNK_SIZE, copy_stream};
pub use decode::Decoder;
pub use encode::{EncodeOptions, Encoder};
pub use error::{Error, Result};
pub use pack::{compress_file, pack_directory};
pub use sniff::{ArchiveKind, sniff, sniff_reader};
pub use unpack::{unpack_directory, unpack_file};
// Re-export as it's part of the API.
pub use zstd_safe::CompressionLevel;

/// The outcome of [`compress`] or [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The layout of the archive that was written or read.
    pub kind: ArchiveKind,
    /// The absolute path of the output: the archive when compressing, the extracted file or
    /// destination directory when extracting.
    pub path: PathBuf,
}

/// Compresses `source` into `archive`.
///
/// A directory is packed as a zstd compressed tar stream, anything else is compressed as a bare
/// zstd stream.
///
/// # Errors
///
/// Fails without touching the filesystem if `archive` does not end with `.zst`, and without
/// creating `archive` if `source` does not exist. Any later I/O or codec error is returned as is.
pub fn compress(source: &Path, archive: &Path, opts: &EncodeOptions) -> Result<Report> {
    path::ensure_archive_extension(archive)?;
    path::ensure_source_exists(source)?;

    if source.is_dir() {
        Ok(Report {
            kind: ArchiveKind::Tar,
            path: pack_directory(source, archive, opts)?,
        })
    } else {
        Ok(Report {
            kind: ArchiveKind::Bare,
            path: compress_file(source, archive, opts)?,
        })
    }
}

/// Extracts `archive` into `destination`.
///
/// Tar archives are unpacked below `destination`. Bare archives are written into `destination`
/// if it is an existing directory, or to `destination` itself otherwise.
///
/// # Errors
///
/// Fails if `archive` does not end with `.zst` or does not exist, and on any I/O or codec error
/// during extraction.
pub fn extract(archive: &Path, destination: &Path) -> Result<Report> {
    path::ensure_archive_extension(archive)?;
    path::ensure_archive_exists(archive)?;

    let kind = sniff(archive)?;
    let path = match kind {
        ArchiveKind::Tar => unpack_directory(archive, destination)?,
        ArchiveKind::Bare => unpack_file(archive, destination)?,
    };

    Ok(Report { kind, path })
}

#[doc = include_str!("../../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
