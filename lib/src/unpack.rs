use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    copy::copy_stream,
    decode::Decoder,
    error::Result,
    path::{absolutize, strip_archive_suffix},
};

/// Extracts every member of the tar archive at `archive` below `destination`.
///
/// `destination` and its parents are created if needed. Members that would land outside of
/// `destination` are skipped by the tar extractor.
///
/// Returns the absolute path of `destination`.
///
/// # Errors
///
/// Fails if the archive cannot be decoded or a member cannot be written.
pub fn unpack_directory(archive: &Path, destination: &Path) -> Result<PathBuf> {
    fs::create_dir_all(destination)?;

    let decoder = Decoder::new(BufReader::new(File::open(archive)?))?;
    tar::Archive::new(decoder).unpack(destination)?;

    Ok(absolutize(destination)?)
}

/// Decompresses the bare archive at `archive` into a single file.
///
/// If `destination` is an existing directory, the file is created inside of it, named like the
/// archive without its `.zst` suffix. Otherwise `destination` is the file to create, its parent
/// directory is created if needed.
///
/// Returns the absolute path of the written file.
///
/// # Errors
///
/// Fails if the archive cannot be decoded or the output cannot be written.
pub fn unpack_file(archive: &Path, destination: &Path) -> Result<PathBuf> {
    let out_path = output_path(archive, destination);
    let missing_parent = out_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.is_dir());
    if let Some(parent) = missing_parent {
        fs::create_dir_all(parent)?;
    }

    let mut decoder = Decoder::new(BufReader::new(File::open(archive)?))?;
    let mut output = BufWriter::new(File::create(&out_path)?);
    copy_stream(&mut decoder, &mut output)?;
    output.flush()?;

    Ok(absolutize(&out_path)?)
}

fn output_path(archive: &Path, destination: &Path) -> PathBuf {
    if destination.is_dir() {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        destination.join(strip_archive_suffix(&name))
    } else {
        destination.to_path_buf()
    }
}
