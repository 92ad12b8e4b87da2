//! Batch controller: strictly sequential per-path processing with exit
//! status aggregation. One bad path never prevents attempts on the rest.

use crate::classify::classify;
use crate::exec::{execute, PROGRAM};
use crate::fs::FileSystem;
use crate::models::{EnvMap, ExitStatus, Flags};
use crate::resolve::{resolve, Prompter};
use crate::store::TrashStore;
use std::io::Write;
use std::path::PathBuf;

/// Runs the whole batch. The trash store is initialized once up front;
/// failure there is fatal and nothing gets processed (exit code 3). Each
/// path is fully classified, resolved (possibly prompting) and executed
/// before the next is considered. The first non-zero per-path status seen
/// becomes the batch status.
pub fn run_batch(
    fs: &dyn FileSystem,
    env: &EnvMap,
    flags: Flags,
    paths: &[PathBuf],
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> ExitStatus {
    let store = match TrashStore::from_env(fs, env) {
        Ok(store) => store,
        Err(e) => {
            let _ = writeln!(err, "{PROGRAM}: {e}");
            return ExitStatus::StoreInit;
        }
    };

    let mut aggregate = ExitStatus::Ok;
    for path in paths {
        let classified = classify(fs, env, path);
        let status = match resolve(&classified, flags, prompter) {
            Ok(disposition) => execute(fs, &store, flags, &classified, disposition, out, err),
            Err(e) => {
                let _ = writeln!(err, "{PROGRAM}: {e}");
                ExitStatus::Failure
            }
        };
        if aggregate == ExitStatus::Ok {
            aggregate = status;
        }
    }
    aggregate
}
