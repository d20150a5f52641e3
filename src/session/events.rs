use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Record type carrying the agent's tool invocations
const ASSISTANT_RECORD: &str = "assistant";

/// A single tool invocation pulled out of a session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    /// Tool name as logged (e.g., "Read", "Edit", "Bash")
    pub tool_name: String,

    /// Tool input parameters
    pub parameters: Map<String, Value>,

    /// Timestamp of the enclosing record (empty if the record had none)
    pub timestamp: String,

    /// Session file name the event came from
    pub source_id: String,
}

impl ToolEvent {
    /// Create an event with no parameters, timestamp or source
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: Map::new(),
            timestamp: String::new(),
            source_id: String::new(),
        }
    }

    /// Add an input parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The `file_path` parameter, if present as a non-empty string
    pub fn file_path(&self) -> Option<&str> {
        self.parameters
            .get("file_path")
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
    }
}

/// Text field that tolerates null and scalar values (null → "", 42 → "42")
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// One line of a session log
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type", default)]
    kind: Option<Value>,

    #[serde(default, deserialize_with = "lenient_text")]
    timestamp: String,

    #[serde(default)]
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    content: Option<MessageContent>,
}

/// User turns carry plain text, agent turns carry a list of content items
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Items(Vec<Value>),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentItem {
    ToolUse {
        #[serde(default, deserialize_with = "lenient_text")]
        name: String,
        #[serde(default)]
        input: Map<String, Value>,
    },
    #[serde(other)]
    Other,
}

/// Decode one log line into the tool events it contains
///
/// Malformed lines, non-assistant records and content items that are not
/// tool invocations yield nothing.
pub fn parse_record(line: &str, source_id: &str) -> Vec<ToolEvent> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let record: RawRecord = match serde_json::from_str(line) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(source = source_id, error = %e, "skipping malformed record");
            return Vec::new();
        }
    };

    if record.kind.as_ref().and_then(Value::as_str) != Some(ASSISTANT_RECORD) {
        return Vec::new();
    }

    let items = match record.message.and_then(|m| m.content) {
        Some(MessageContent::Items(items)) => items,
        Some(MessageContent::Text(_)) | None => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| ContentItem::deserialize(item).ok())
        .filter_map(|item| match item {
            ContentItem::ToolUse { name, input } => Some(ToolEvent {
                tool_name: name,
                parameters: input,
                timestamp: record.timestamp.clone(),
                source_id: source_id.to_string(),
            }),
            ContentItem::Other => None,
        })
        .collect()
}

/// Lazily extract tool events from a stream of log lines
///
/// # Example
/// ```
/// use filehop::session::extract_events;
///
/// let lines = vec![
///     r#"{"type":"assistant","message":{"content":[{"type":"tool_use","name":"Read","input":{"file_path":"src/lib.rs"}}]}}"#,
///     "not json",
/// ];
/// let events: Vec<_> = extract_events(lines, "agent-1.jsonl").collect();
///
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].file_path(), Some("src/lib.rs"));
/// ```
pub fn extract_events<I, S>(lines: I, source_id: impl Into<String>) -> impl Iterator<Item = ToolEvent>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let source_id = source_id.into();
    lines
        .into_iter()
        .flat_map(move |line| parse_record(line.as_ref(), &source_id))
}

/// Read every tool event from a session file
///
/// A file that cannot be opened yields no events. Lines that are not valid
/// UTF-8 are skipped like any other malformed line. An I/O failure part way
/// through keeps the events decoded before it. Failures are logged, never
/// returned.
pub fn read_session_file(path: &Path) -> Vec<ToolEvent> {
    let source_id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Could not parse {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).split(b'\n').enumerate() {
        match line.map(String::from_utf8) {
            Ok(Ok(line)) => events.extend(parse_record(&line, &source_id)),
            Ok(Err(e)) => {
                tracing::debug!(source = %source_id, line = index + 1, error = %e, "skipping non-UTF-8 line");
            }
            Err(e) => {
                tracing::warn!("Could not parse {}: {}", path.display(), e);
                break;
            }
        }
    }

    events
}
