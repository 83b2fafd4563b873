use std::{fmt, io, path::PathBuf};

/// Filesystem operation a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Stat,
    LinkStat,
    FileStat,
    ReadDir,
    ReadFile,
    WriteFile,
    CreateDir,
    RemoveDir,
    Unlink,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Stat => "stat",
            Op::LinkStat => "lstat",
            Op::FileStat => "fstat",
            Op::ReadDir => "readdir",
            Op::ReadFile => "read",
            Op::WriteFile => "write",
            Op::CreateDir => "mkdir",
            Op::RemoveDir => "rmdir",
            Op::Unlink => "unlink",
        };
        f.write_str(name)
    }
}

/// Error surfaced by a pipeline.
///
/// Every variant except [`FsError::Cancelled`] names the failing operation
/// and the path it was applied to, so a single error is enough to locate a
/// failure without unwinding the combinator chain that produced it.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("{op} {}: not found", path.display())]
    NotFound { op: Op, path: PathBuf },

    #[error("{op} {}: permission denied", path.display())]
    PermissionDenied { op: Op, path: PathBuf },

    /// Directory removal on a directory that still has entries.
    #[error("{op} {}: directory not empty", path.display())]
    NotEmpty { op: Op, path: PathBuf },

    /// Directory creation on an existing path. Callers that create
    /// directories through [`crate::FileSystem::mkdir`] or a write never
    /// see this; it only escapes from the raw primitive.
    #[error("{op} {}: already exists", path.display())]
    AlreadyExists { op: Op, path: PathBuf },

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: Op,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The pipeline was cancelled before it completed.
    #[error("pipeline cancelled")]
    Cancelled,
}

impl FsError {
    /// Classify an I/O failure of `op` on `path`.
    pub fn from_io(op: Op, path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { op, path },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { op, path },
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists { op, path },
            io::ErrorKind::DirectoryNotEmpty => FsError::NotEmpty { op, path },
            _ => FsError::Io {
                op,
                path,
                source: err,
            },
        }
    }

    pub fn op(&self) -> Option<Op> {
        match self {
            FsError::NotFound { op, .. }
            | FsError::PermissionDenied { op, .. }
            | FsError::NotEmpty { op, .. }
            | FsError::AlreadyExists { op, .. }
            | FsError::Io { op, .. } => Some(*op),
            FsError::Cancelled => None,
        }
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            FsError::NotFound { path, .. }
            | FsError::PermissionDenied { path, .. }
            | FsError::NotEmpty { path, .. }
            | FsError::AlreadyExists { path, .. }
            | FsError::Io { path, .. } => Some(path),
            FsError::Cancelled => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }
}

pub type Result<T, E = FsError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
