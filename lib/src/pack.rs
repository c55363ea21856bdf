use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    copy::copy_stream,
    encode::EncodeOptions,
    error::Result,
    path::absolutize,
};

/// Compresses the single file `source` into a bare zstd stream at `archive`.
///
/// Returns the absolute path of the archive.
///
/// # Errors
///
/// Fails if `source` cannot be read, `archive` cannot be written, or compression fails. A
/// partially written archive is left behind.
pub fn compress_file(source: &Path, archive: &Path, opts: &EncodeOptions) -> Result<PathBuf> {
    let mut input = File::open(source)?;
    let output = BufWriter::new(File::create(archive)?);
    let mut encoder = opts.into_encoder(output)?;

    copy_stream(&mut input, &mut encoder)?;
    encoder.finish()?;

    Ok(absolutize(archive)?)
}

/// Packs every file below `source_root` into a zstd compressed tar stream at `archive`.
///
/// Member names are relative to the parent of `source_root`, so the name of the directory itself
/// is the first component of every member. Directories are not stored, empty ones are lost. If
/// `archive` lies below `source_root` it is left out of the stream.
///
/// Returns the absolute path of the archive.
///
/// # Errors
///
/// Fails on the first entry that cannot be read or archived, or if writing the archive fails. A
/// partially written archive is left behind.
pub fn pack_directory(source_root: &Path, archive: &Path, opts: &EncodeOptions) -> Result<PathBuf> {
    let root = absolutize(source_root)?;
    let parent = root.parent().unwrap_or(&root).to_path_buf();
    let target = absolutize(archive)?;

    let output = BufWriter::new(File::create(archive)?);
    let encoder = opts.into_encoder(output)?;
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    append_tree(&mut builder, &root, &parent, &target)?;

    let encoder = builder.into_inner()?;
    encoder.finish()?;

    Ok(target)
}

fn append_tree<W: Write>(
    builder: &mut tar::Builder<W>,
    root: &Path,
    parent: &Path,
    skip: &Path,
) -> Result<()> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        // Links to directories are not descended into, and are not files either
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }
        // The archive being written
        if entry.path() == skip {
            continue;
        }

        let name = entry
            .path()
            .strip_prefix(parent)
            .map_err(std::io::Error::other)?;
        builder.append_path_with_name(entry.path(), name)?;
    }

    Ok(())
}
