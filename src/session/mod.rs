// Session Log Extraction
//
// Agent session logs are JSONL files, one record per line. Assistant records
// carry a list of content items; every `tool_use` item is one tool invocation.
// This module turns those files into ordered file-access sequences:
//
//   agent-*.jsonl → ToolEvent stream → reads / writes (per session)
//
// Every session is handled on its own. Nothing here knows about transitions.

mod access;
mod discovery;
mod events;

pub use access::{
    extract_file_reads, extract_file_writes, normalize_path, AccessSequence, READ_TOOL,
    WRITE_TOOLS,
};
pub use discovery::{is_session_file, list_session_files, SESSION_FILE_EXTENSION, SESSION_FILE_PREFIX};
pub use events::{extract_events, parse_record, read_session_file, ToolEvent};
