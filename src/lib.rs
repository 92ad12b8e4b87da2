//! Classification-and-disposition engine for safe, trash-aware file
//! deletion. This crate intentionally stays dependency-light and holds the
//! full decision core: path classification, the disposition state machine,
//! the trash store, and the batch controller. The CLI shell lives in the
//! `saferm-cli` crate.

pub mod batch;
pub mod classify;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod helpers;
pub mod models;
pub mod resolve;
pub mod store;

pub use batch::run_batch;
pub use classify::{classify, resolve_absolute, CONFIG_MARKERS, PROTECTED_ROOTS};
pub use errors::{Error, Result};
pub use exec::execute;
pub use fs::{FileSystem, RealFileSystem};
pub use helpers::{
    build_unique_basename,
    sanitize_user_path,
    serialize_system_time,
    TRASHINFO_EXTENSION,
    TRASHINFO_HEADER,
    TRASHINFO_TIME_FORMAT,
};
pub use models::{
    Classification,
    Classified,
    Disposition,
    EnvMap,
    ExitStatus,
    Flags,
    PromptKind,
    TrashItem,
};
pub use resolve::{resolve, Prompter, ScriptedPrompter, TtyPrompter};
pub use store::{resolve_trash_root, TrashStore};

/// Re-export a small stable API surface for the command crate.
pub mod prelude {
    pub use crate::{
        batch::run_batch,
        errors::{Error, Result},
        fs::{FileSystem, RealFileSystem},
        helpers::*,
        models::*,
        resolve::{Prompter, ScriptedPrompter, TtyPrompter},
        store::TrashStore,
    };
}
