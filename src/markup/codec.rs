//! Text form of the markup collection shown in the data panel.

use serde_json::Value;
use thiserror::Error;

use super::MarkupRecord;

pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("markup data is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("markup data must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
    #[error("failed to serialize markup: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Renders the collection as a JSON array with one record per line.
///
/// The brackets sit on their own lines, so an empty collection becomes `"[\n]"`.
pub fn encode(records: &[MarkupRecord]) -> CodecResult<String> {
    let mut text = String::from("[");
    for (index, record) in records.iter().enumerate() {
        text.push_str(if index > 0 { ",\n" } else { "\n" });
        let line = serde_json::to_string(record).map_err(CodecError::Serialize)?;
        text.push_str(&line);
    }
    text.push_str("\n]");
    Ok(text)
}

/// Parses panel text into its array elements without checking record shape.
pub fn decode(text: &str) -> CodecResult<Vec<Value>> {
    match serde_json::from_str::<Value>(text).map_err(CodecError::Parse)? {
        Value::Array(items) => Ok(items),
        other => Err(CodecError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
