//! Path classification: absolute resolution, protection rules, and the
//! directory/config/plain split that drives prompt selection.

use crate::fs::FileSystem;
use crate::helpers::sanitize_user_path;
use crate::models::{Classification, Classified, EnvMap};
use std::path::{Path, PathBuf};

/// System directories blocked from any deletion action, for themselves and
/// everything nested under them. `/root` doubles as the superuser's home.
pub const PROTECTED_ROOTS: &[&str] = &[
    "/bin", "/boot", "/dev", "/etc", "/lib", "/lib64", "/opt", "/proc", "/root", "/sbin",
    "/sys", "/usr", "/var",
];

/// Substrings that mark a path as configuration even when the base name does
/// not start with a dot.
pub const CONFIG_MARKERS: &[&str] = &[
    ".config",
    ".bashrc",
    ".bash_profile",
    ".profile",
    ".zshrc",
    ".ssh",
    ".gnupg",
    ".gitconfig",
    ".local/share",
];

/// Resolves a target to absolute form without following a final symlink:
/// the canonical parent joined with the base name, for relative and
/// absolute inputs alike, so `.` and `..` segments can never smuggle a
/// target past the protection scan. Fails soft — when the parent cannot
/// be canonicalized the path is normalized lexically instead of aborting.
pub fn resolve_absolute(fs: &dyn FileSystem, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        fs.current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    let Some(name) = absolute.file_name() else {
        return lexical_normalize(&absolute);
    };
    match absolute.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => match fs.canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => lexical_normalize(&absolute),
        },
        _ => lexical_normalize(&absolute),
    }
}

/// Resolves `.` and `..` components without touching the filesystem.
/// Fallback for paths whose parent does not exist; a `..` crossing a
/// symlinked ancestor may differ from the physical resolution.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                // pop() keeps the root component in place.
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Classifies a target path. Protection checks win over everything else;
/// the directory check runs before the config/hidden heuristics so that
/// directories always get the folder prompt.
pub fn classify(fs: &dyn FileSystem, env: &EnvMap, raw: &Path) -> Classified {
    let resolved = resolve_absolute(fs, raw);
    let exists = fs.exists(&resolved);

    for root in PROTECTED_ROOTS {
        // Component-wise match: /usrx is not under /usr.
        if resolved.starts_with(root) {
            return Classified {
                raw: raw.to_path_buf(),
                resolved,
                class: Classification::SystemProtected,
                reason: Some(format!("'{root}' is a protected system directory")),
                exists,
            };
        }
    }

    if let Some(home) = env.get("HOME").filter(|h| !h.is_empty()) {
        if resolved == Path::new(home) {
            let reason = format!("'{}' is your home directory", sanitize_user_path(&resolved));
            return Classified {
                raw: raw.to_path_buf(),
                resolved,
                class: Classification::HomeRoot,
                reason: Some(reason),
                exists,
            };
        }
    }

    let is_dir = fs
        .symlink_metadata(&resolved)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    let class = if is_dir {
        Classification::Directory
    } else if is_config_hidden(&resolved) {
        Classification::ConfigHidden
    } else {
        Classification::Plain
    };

    Classified {
        raw: raw.to_path_buf(),
        resolved,
        class,
        reason: None,
        exists,
    }
}

fn is_config_hidden(path: &Path) -> bool {
    let hidden_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'));
    if hidden_name {
        return true;
    }
    let text = path.to_string_lossy();
    CONFIG_MARKERS.iter().any(|marker| text.contains(marker))
}
