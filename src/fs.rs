use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem abstraction boundary for the disposition engine.
///
/// Keeping this trait narrow makes it easy to write deterministic tests and
/// allows alternative backends if callers need them. Methods return plain
/// `io::Result` so call sites can map failures into the domain error that
/// fits the operation (move, delete, store init).
pub trait FileSystem: Send + Sync {
    /// Returns the current time in wall-clock format.
    fn now(&self) -> SystemTime;

    /// Returns true when path exists (symlink-aware: a dangling symlink exists).
    fn exists(&self, path: &Path) -> bool;

    /// Reads metadata without following a final symlink.
    fn symlink_metadata(&self, path: &Path) -> io::Result<Metadata>;

    /// Resolves a path to canonical absolute form.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Returns the process working directory.
    fn current_dir(&self) -> io::Result<PathBuf>;

    /// Creates a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Writes UTF-8 text (truncate + replace).
    fn write_to_string(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Removes a single file or symlink.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Removes a directory and its whole subtree.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Renames/moves a path, carrying a directory subtree as one unit.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<Metadata> {
        fs::symlink_metadata(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_to_string(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|v| v.path()))
            .collect()
    }
}
