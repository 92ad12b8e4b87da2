//! Shared helpers for trash metadata records and user-facing path rendering.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::SystemTime;

/// File extension used by trash info files.
pub const TRASHINFO_EXTENSION: &str = ".trashinfo";

/// Section header that opens every trash info record.
pub const TRASHINFO_HEADER: &str = "[Trash Info]";

/// Deletion date format used by Trash info metadata (UTC, second precision).
pub const TRASHINFO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Returns a user-safe, trimmed path string for logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Builds a suffixed filename used to dodge collisions in the payload store.
pub fn build_unique_basename(file_name: &str, suffix: u64) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("item");
    format!("{base}.{suffix}")
}

/// Serializes a wall-clock time into the trashinfo deletion-date format.
pub fn serialize_system_time(time: SystemTime) -> String {
    let dt = DateTime::<Utc>::from(time);
    dt.format(TRASHINFO_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn serializes_epoch_in_trashinfo_format() {
        let t = UNIX_EPOCH + Duration::from_secs(86_400 + 3_661);
        assert_eq!(serialize_system_time(t), "1970-01-02T01:01:01");
    }

    #[test]
    fn unique_basename_appends_counter() {
        assert_eq!(build_unique_basename("notes.txt", 1), "notes.txt.1");
        assert_eq!(build_unique_basename("notes.txt", 12), "notes.txt.12");
    }

    #[test]
    fn unique_basename_strips_leading_directories() {
        assert_eq!(build_unique_basename("a/b/notes.txt", 2), "notes.txt.2");
    }
}
