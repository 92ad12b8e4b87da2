//! Trash store: the `files/` payload directory and the `info/` metadata
//! directory, following the desktop trash convention so external viewers
//! and emptying tools can interoperate.

use crate::errors::{Error, Result};
use crate::fs::FileSystem;
use crate::helpers::{
    build_unique_basename, serialize_system_time, TRASHINFO_EXTENSION, TRASHINFO_HEADER,
};
use crate::models::{EnvMap, TrashItem};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Handle to an initialized trash location.
#[derive(Debug, Clone)]
pub struct TrashStore {
    pub root: PathBuf,
    pub files_dir: PathBuf,
    pub info_dir: PathBuf,
}

/// Resolves the trash root: `$XDG_DATA_HOME/Trash` when set, otherwise
/// `$HOME/.local/share/Trash`. The `XDG_DATA_HOME` override is the supported
/// mechanism for relocating the store (and for test isolation).
pub fn resolve_trash_root(env: &EnvMap) -> PathBuf {
    if let Some(xdg) = env.get("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return Path::new(xdg).join("Trash");
    }
    let home = env.get("HOME").map(String::as_str).unwrap_or("");
    Path::new(home).join(".local").join("share").join("Trash")
}

impl TrashStore {
    /// Creates the store at the environment-resolved root. Failure here is
    /// fatal to the whole batch (exit code 3).
    pub fn from_env(fs: &dyn FileSystem, env: &EnvMap) -> Result<Self> {
        Self::at(fs, resolve_trash_root(env))
    }

    /// Creates the store at an explicit root.
    pub fn at(fs: &dyn FileSystem, root: PathBuf) -> Result<Self> {
        let files_dir = root.join("files");
        let info_dir = root.join("info");
        fs.create_dir_all(&files_dir)
            .map_err(|err| Error::store_init(&root, err))?;
        fs.create_dir_all(&info_dir)
            .map_err(|err| Error::store_init(&root, err))?;
        Ok(Self {
            root,
            files_dir,
            info_dir,
        })
    }

    /// Moves `source` (a file or a whole directory subtree) into the payload
    /// store and writes its metadata record. The record is written only after
    /// the move succeeds; a payload without a record is the only tolerated
    /// partial state, never the reverse.
    pub fn deposit(
        &self,
        fs: &dyn FileSystem,
        source: &Path,
        original_abs: &Path,
    ) -> Result<TrashItem> {
        let name = self.free_name(fs, source)?;
        let trashed_path = self.files_dir.join(&name);

        fs.rename(source, &trashed_path)
            .map_err(|err| Error::move_failure(source, err))?;

        let now = fs.now();
        let deleted_at: DateTime<Utc> = now.into();
        let info_path = self.info_dir.join(format!("{name}{TRASHINFO_EXTENSION}"));
        let record = format!(
            "{TRASHINFO_HEADER}\nPath={}\nDeletionDate={}\n",
            original_abs.display(),
            serialize_system_time(now),
        );
        fs.write_to_string(&info_path, &record)
            .map_err(|err| Error::io(&info_path, err))?;

        Ok(TrashItem {
            name,
            original_path: original_abs.to_path_buf(),
            trashed_path,
            info_path,
            deleted_at,
        })
    }

    /// Picks the first free payload name: the base name itself, then
    /// `name.1`, `name.2`, ... in increasing order. Safe for sequential use
    /// within one process; concurrent external writers are out of scope.
    fn free_name(&self, fs: &dyn FileSystem, source: &Path) -> Result<String> {
        let base = source
            .file_name()
            .and_then(|v| v.to_str())
            .unwrap_or("item")
            .to_string();

        let taken: HashSet<OsString> = fs
            .list_dir(&self.files_dir)
            .map_err(|err| Error::io(&self.files_dir, err))?
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_os_string()))
            .collect();

        if !taken.contains(OsStr::new(&base)) {
            return Ok(base);
        }
        let mut suffix = 1u64;
        loop {
            let candidate = build_unique_basename(&base, suffix);
            if !taken.contains(OsStr::new(&candidate)) {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }
}
