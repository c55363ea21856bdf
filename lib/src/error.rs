use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use zstd_safe::{ErrorCode, get_error_name};

/// A `Result` alias where the `Err` case is `zarc::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors that may occur when working with this crate.
#[derive(Debug)]
pub struct Error {
    kind: Kind,
}

impl Error {
    pub(crate) fn invalid_extension(path: &Path) -> Self {
        Self {
            kind: Kind::InvalidExtension(path.to_path_buf()),
        }
    }

    pub(crate) fn not_found(role: &'static str, path: &Path) -> Self {
        Self {
            kind: Kind::NotFound {
                role,
                path: path.to_path_buf(),
            },
        }
    }

    pub(crate) fn truncated() -> Self {
        Self {
            kind: Kind::Truncated,
        }
    }

    pub(crate) fn zstd_create(msg: &'static str) -> Self {
        Self {
            kind: Kind::Create(msg),
        }
    }

    /// Whether the archive path lacks the `.zst` extension.
    pub fn is_invalid_extension(&self) -> bool {
        matches!(self.kind, Kind::InvalidExtension(_))
    }

    /// Whether a source or archive path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, Kind::NotFound { .. })
    }

    /// Whether compressed input ended in the middle of a frame.
    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, Kind::Truncated)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            Kind::InvalidExtension(path) => write!(
                f,
                "invalid archive extension: {}; only .zst (zstd) archives are supported",
                path.display()
            ),
            Kind::NotFound { role, path } => write!(f, "{role} not found: {}", path.display()),
            Kind::Truncated => f.write_str("compressed stream ends in the middle of a frame"),
            Kind::IO(err) => write!(f, "io error: {err}"),
            Kind::Create(t) => write!(f, "failed to create {t:?}"),
            Kind::Zstd(code) => f.write_str(get_error_name(*code)),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            Kind::IO(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            kind: Kind::IO(value),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(value: walkdir::Error) -> Self {
        Self::from(std::io::Error::from(value))
    }
}

impl From<ErrorCode> for Error {
    fn from(value: ErrorCode) -> Self {
        Self {
            kind: Kind::Zstd(value),
        }
    }
}

#[derive(Debug)]
enum Kind {
    /// The archive name does not end with `.zst`.
    InvalidExtension(PathBuf),
    /// A required path does not exist.
    NotFound { role: &'static str, path: PathBuf },
    /// The compressed source ended before the current frame was complete.
    Truncated,
    /// IO error.
    IO(std::io::Error),
    /// Failed to create zstd type.
    Create(&'static str),
    /// An error from the zstd library.
    Zstd(ErrorCode),
}
