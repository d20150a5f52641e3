use crate::session::ToolEvent;

/// Tool that reads a file
pub const READ_TOOL: &str = "Read";

/// Tools that modify a file
pub const WRITE_TOOLS: [&str; 2] = ["Write", "Edit"];

/// Type alias for an ordered list of accessed file paths
pub type AccessSequence = Vec<String>;

fn file_paths<F>(events: &[ToolEvent], matches: F) -> AccessSequence
where
    F: Fn(&str) -> bool,
{
    events
        .iter()
        .filter(|e| matches(e.tool_name.as_str()))
        .filter_map(ToolEvent::file_path)
        .map(str::to_string)
        .collect()
}

/// Files read, in log order
///
/// Events without a `file_path` parameter are skipped. Repeated reads of the
/// same file are kept.
pub fn extract_file_reads(events: &[ToolEvent]) -> AccessSequence {
    file_paths(events, |tool| tool == READ_TOOL)
}

/// Files written or edited, in log order
pub fn extract_file_writes(events: &[ToolEvent]) -> AccessSequence {
    file_paths(events, |tool| WRITE_TOOLS.iter().any(|w| *w == tool))
}

/// Make `path` relative to `root` when it lies under it
///
/// The match is a plain string prefix. Paths outside the root are returned
/// unchanged so that cross-project reads still show up in the model.
///
/// # Example
/// ```
/// use filehop::session::normalize_path;
///
/// assert_eq!(normalize_path("/home/dev/proj/src/main.rs", "/home/dev/proj"), "src/main.rs");
/// assert_eq!(normalize_path("/etc/hosts", "/home/dev/proj"), "/etc/hosts");
/// ```
pub fn normalize_path(path: &str, root: &str) -> String {
    if root.is_empty() {
        return path.to_string();
    }

    match path.strip_prefix(root) {
        Some(rel) => rel.strip_prefix('/').unwrap_or(rel).to_string(),
        None => path.to_string(),
    }
}
