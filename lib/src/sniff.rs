use std::{fmt::Display, fs::File, io::Read, path::Path};

use crate::{decode::Decoder, error::Result};

/// The container layout of an archive.
///
/// Nothing in the archive records this, it is decided when compressing and recovered by
/// [`sniff`] when extracting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A tar stream compressed with zstd, produced from a directory.
    Tar,
    /// The zstd compressed bytes of a single file.
    Bare,
}

impl Display for ArchiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveKind::Tar => f.write_str("tar+zst"),
            ArchiveKind::Bare => f.write_str("zst"),
        }
    }
}

/// Determines whether the archive at `path` holds a tar stream.
///
/// The archive is decoded and every tar member header is read. Any decoding or tar parse error
/// makes the archive [`ArchiveKind::Bare`], as does an archive that decodes to nothing at all.
///
/// A tar stream ends with a zero filled header block, so a single file whose first 512 bytes are
/// all zero reads as a tar stream without members and sniffs as [`ArchiveKind::Tar`]. Extracting
/// such an archive yields an empty directory.
///
/// # Errors
///
/// Only if the archive cannot be opened.
pub fn sniff(path: &Path) -> Result<ArchiveKind> {
    let file = File::open(path)?;
    Ok(sniff_reader(file))
}

/// Like [`sniff`], for compressed data from any reader.
pub fn sniff_reader<R: Read>(reader: R) -> ArchiveKind {
    let Ok(decoder) = Decoder::new(reader) else {
        return ArchiveKind::Bare;
    };
    let mut archive = tar::Archive::new(decoder);

    if list_members(&mut archive).is_err() {
        return ArchiveKind::Bare;
    }

    if archive.into_inner().written_decompressed() == 0 {
        ArchiveKind::Bare
    } else {
        ArchiveKind::Tar
    }
}

fn list_members<R: Read>(archive: &mut tar::Archive<R>) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in archive.entries()? {
        entry?.path()?;
        count += 1;
    }

    Ok(count)
}
