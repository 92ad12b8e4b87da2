use std::{io, path::PathBuf};

/// Shared error type for the classification-and-disposition engine.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Target does not exist at resolution time.
    #[error("cannot remove '{0}': no such file or directory")]
    NotFound(PathBuf),

    /// A protection rule matched; the operation is refused outright.
    #[error("refusing to remove '{path}': {reason}")]
    Blocked { path: PathBuf, reason: String },

    /// A directory would be trashed or deleted without the recursive flag.
    #[error("cannot remove directory '{0}': the recursive flag (-r) is required")]
    RecursionRequired(PathBuf),

    /// The trash deposit's underlying move primitive failed.
    #[error("failed to move '{0}' to trash")]
    Move(PathBuf, #[source] io::Error),

    /// The permanent-delete primitive failed.
    #[error("failed to delete '{0}'")]
    Delete(PathBuf, #[source] io::Error),

    /// Trash root directories could not be created at startup. Fatal.
    #[error("failed to initialize trash directories under '{0}'")]
    StoreInit(PathBuf, #[source] io::Error),

    /// Reading the interactive response failed.
    #[error("failed to read response")]
    Prompt(#[source] io::Error),

    /// Generic file system I/O failure.
    #[error("I/O error while accessing '{0}'")]
    Io(PathBuf, #[source] io::Error),
}

impl Error {
    pub fn blocked(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Blocked {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn move_failure(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Move(path.into(), error)
    }

    pub fn delete_failure(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Delete(path.into(), error)
    }

    pub fn store_init(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::StoreInit(path.into(), error)
    }

    pub fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Io(path.into(), error)
    }
}

/// Shared result alias for the core crate.
pub type Result<T> = std::result::Result<T, Error>;
