//! Action executor: carries out one resolved disposition and reports the
//! per-path outcome without ever aborting the rest of the batch.

use crate::errors::Error;
use crate::fs::FileSystem;
use crate::helpers::sanitize_user_path;
use crate::models::{Classified, Disposition, ExitStatus, Flags};
use crate::store::TrashStore;
use std::io::Write;

/// Diagnostic prefix on every error line.
pub const PROGRAM: &str = "saferm";

/// Executes `disposition` for one target. Verbose mode adds confirmations on
/// `out`; errors always go to `err` regardless of verbosity. The returned
/// status is this path's contribution to the batch exit code.
pub fn execute(
    fs: &dyn FileSystem,
    store: &TrashStore,
    flags: Flags,
    classified: &Classified,
    disposition: Disposition,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> ExitStatus {
    let shown = sanitize_user_path(&classified.resolved);
    match disposition {
        Disposition::Trash { .. } => {
            match store.deposit(fs, &classified.raw, &classified.resolved) {
                Ok(item) => {
                    if flags.verbose {
                        let _ = writeln!(out, "trashed '{shown}' as '{}'", item.name);
                    }
                    ExitStatus::Ok
                }
                Err(e) => {
                    let _ = writeln!(err, "{PROGRAM}: {e}");
                    ExitStatus::Failure
                }
            }
        }
        Disposition::PermanentDelete { recursive } => {
            let result = if recursive {
                fs.remove_dir_all(&classified.raw)
            } else {
                fs.remove_file(&classified.raw)
            };
            match result {
                Ok(()) => {
                    if flags.verbose {
                        let _ = writeln!(out, "permanently deleted '{shown}'");
                    }
                    ExitStatus::Ok
                }
                Err(e) => {
                    let e = Error::delete_failure(&classified.resolved, e);
                    let _ = writeln!(err, "{PROGRAM}: {e}");
                    ExitStatus::Failure
                }
            }
        }
        Disposition::Cancel => {
            if flags.verbose {
                let _ = writeln!(out, "skipped '{shown}'");
            }
            ExitStatus::Failure
        }
        Disposition::Blocked => {
            let reason = classified
                .reason
                .clone()
                .unwrap_or_else(|| "protected path".to_string());
            let e = Error::blocked(&classified.resolved, reason);
            let _ = writeln!(err, "{PROGRAM}: {e}");
            ExitStatus::Blocked
        }
        Disposition::NotFound => {
            let e = Error::NotFound(classified.resolved.clone());
            let _ = writeln!(err, "{PROGRAM}: {e}");
            ExitStatus::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::fs::RealFileSystem;
    use crate::models::EnvMap;
    use std::path::Path;

    fn env_with_home(home: &str) -> EnvMap {
        let mut env = EnvMap::new();
        env.insert("HOME".to_string(), home.to_string());
        env
    }

    fn scratch() -> (tempfile::TempDir, TrashStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TrashStore::at(&RealFileSystem, dir.path().join("Trash")).unwrap();
        (dir, store)
    }

    #[test]
    fn permanent_delete_removes_the_file_without_trashing() {
        let (dir, store) = scratch();
        let victim = dir.path().join("victim.txt");
        std::fs::write(&victim, "x").unwrap();
        let c = classify(&RealFileSystem, &env_with_home("/home/alice"), &victim);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(
            &RealFileSystem,
            &store,
            Flags::default(),
            &c,
            Disposition::PermanentDelete { recursive: false },
            &mut out,
            &mut err,
        );
        assert_eq!(status, ExitStatus::Ok);
        assert!(!victim.exists());
        assert!(std::fs::read_dir(&store.files_dir).unwrap().next().is_none());
    }

    #[test]
    fn cancel_touches_nothing_and_reports_failure_status() {
        let (dir, store) = scratch();
        let victim = dir.path().join("victim.txt");
        std::fs::write(&victim, "x").unwrap();
        let c = classify(&RealFileSystem, &env_with_home("/home/alice"), &victim);

        let verbose = Flags {
            force: false,
            recursive: false,
            verbose: true,
        };
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(
            &RealFileSystem,
            &store,
            verbose,
            &c,
            Disposition::Cancel,
            &mut out,
            &mut err,
        );
        assert_eq!(status, ExitStatus::Failure);
        assert!(victim.exists());
        assert!(String::from_utf8(out).unwrap().contains("skipped"));
        assert!(err.is_empty());
    }

    #[test]
    fn blocked_reports_reason_and_protection_status() {
        let (_dir, store) = scratch();
        let c = classify(
            &RealFileSystem,
            &env_with_home("/home/alice"),
            Path::new("/usr/lib/foo"),
        );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(
            &RealFileSystem,
            &store,
            Flags::default(),
            &c,
            Disposition::Blocked,
            &mut out,
            &mut err,
        );
        assert_eq!(status, ExitStatus::Blocked);
        let message = String::from_utf8(err).unwrap();
        assert!(message.contains("/usr/lib/foo"));
        assert!(message.contains("/usr"));
    }

    #[test]
    fn trash_failure_is_reported_not_propagated() {
        let (dir, store) = scratch();
        let missing = dir.path().join("never-existed");
        let c = classify(&RealFileSystem, &env_with_home("/home/alice"), &missing);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(
            &RealFileSystem,
            &store,
            Flags::default(),
            &c,
            Disposition::Trash { recursive: false },
            &mut out,
            &mut err,
        );
        assert_eq!(status, ExitStatus::Failure);
        assert!(String::from_utf8(err).unwrap().contains("failed to move"));
    }
}
