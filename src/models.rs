use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;

/// Snapshot of the process environment, passed in explicitly so tests can
/// point the trash store and home-directory rules anywhere.
pub type EnvMap = HashMap<String, String>;

/// Process-scoped configuration, parsed once per invocation and read-only
/// during batch processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub force: bool,
    pub recursive: bool,
    pub verbose: bool,
}

impl Flags {
    /// Force mode answers every prompt with the default (trash).
    pub fn skip_prompts(&self) -> bool {
        self.force
    }
}

/// Category assigned to a target path. Protection variants take precedence
/// over everything else and short-circuit further classification.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Classification {
    /// Equal to or nested under a protected system directory.
    SystemProtected,
    /// Exactly the invoking user's home directory (contents are not protected).
    HomeRoot,
    Directory,
    ConfigHidden,
    Plain,
}

/// A classified target: raw user input plus the resolved absolute path and
/// the category it landed in. Constructed once per batch item, immutable.
#[derive(Debug, Clone)]
pub struct Classified {
    pub raw: PathBuf,
    pub resolved: PathBuf,
    pub class: Classification,
    /// Human-readable rule description, set for protection matches.
    pub reason: Option<String>,
    pub exists: bool,
}

impl Classified {
    pub fn is_protected(&self) -> bool {
        matches!(
            self.class,
            Classification::SystemProtected | Classification::HomeRoot
        )
    }

    pub fn is_dir(&self) -> bool {
        self.class == Classification::Directory
    }
}

/// Resolved action for one target path. Produced once by the resolver,
/// consumed exactly once by the executor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Disposition {
    Trash { recursive: bool },
    PermanentDelete { recursive: bool },
    Cancel,
    Blocked,
    NotFound,
}

/// Which prompt wording to use for a target that needs confirmation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PromptKind {
    Folder,
    Config,
    Delete,
}

/// One artifact moved into trash: payload plus its metadata record.
#[derive(Debug, Clone)]
pub struct TrashItem {
    /// Final stored name, possibly carrying a collision suffix.
    pub name: String,
    pub original_path: PathBuf,
    pub trashed_path: PathBuf,
    pub info_path: PathBuf,
    pub deleted_at: DateTime<Utc>,
}

/// Aggregate batch result, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExitStatus {
    Ok,
    /// At least one path cancelled, not found, or failed generically.
    Failure,
    /// At least one path refused by a protection rule.
    Blocked,
    /// Trash directories could not be initialized; nothing was processed.
    StoreInit,
}

impl ExitStatus {
    pub fn as_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Failure => 1,
            Self::Blocked => 2,
            Self::StoreInit => 3,
        }
    }
}
