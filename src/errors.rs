use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of a failed operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    NotEmpty,
    InvalidArgument,
    PartialMove,
    Traversal,
    Io,
}

/// Which half of a copy-then-delete move went wrong.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveStage {
    Copy,
    RemoveSource,
}

impl fmt::Display for MoveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveStage::Copy => f.write_str("copying to the destination"),
            MoveStage::RemoveSource => f.write_str("removing the source after copying"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: no such file or directory", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: permission denied", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("{}: directory not empty", path.display())]
    NotEmpty { path: PathBuf },
    #[error("{}: not a directory", path.display())]
    NotADirectory { path: PathBuf },
    #[error("{}: not a regular file or directory", path.display())]
    Unsupported { path: PathBuf },
    #[error("invalid mode {0:?}: provide octal like 755 or 0755")]
    InvalidMode(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("move {} -> {} failed while {stage}: {source}", src.display(), dst.display())]
    MoveFailed {
        src: PathBuf,
        dst: PathBuf,
        stage: MoveStage,
        #[source]
        source: Box<Error>,
    },
    #[error("search stopped at {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Classify an io error raised while operating on `path`.
    pub fn io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            io::ErrorKind::DirectoryNotEmpty => Error::NotEmpty { path },
            io::ErrorKind::NotADirectory => Error::NotADirectory { path },
            _ => Error::Io { path, source: err },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Error::NotEmpty { .. } => ErrorKind::NotEmpty,
            Error::NotADirectory { .. }
            | Error::Unsupported { .. }
            | Error::InvalidMode(_)
            | Error::MissingArgument(_) => ErrorKind::InvalidArgument,
            Error::MoveFailed { .. } => ErrorKind::PartialMove,
            Error::Traversal { .. } => ErrorKind::Traversal,
            Error::Io { .. } => ErrorKind::Io,
        }
    }
}
