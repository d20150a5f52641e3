use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of session files that contain tool calls
pub const SESSION_FILE_PREFIX: &str = "agent-";

/// Extension of session files
pub const SESSION_FILE_EXTENSION: &str = "jsonl";

/// True if `path` names an agent session log (`agent-*.jsonl`)
pub fn is_session_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(SESSION_FILE_PREFIX)
        && path.extension().and_then(|e| e.to_str()) == Some(SESSION_FILE_EXTENSION)
}

/// List agent session files in `dir`, sorted by path
///
/// A missing or unreadable directory lists as empty.
pub fn list_session_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No session directory at {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut sessions: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_session_file(path))
        .collect();
    sessions.sort();
    sessions
}
