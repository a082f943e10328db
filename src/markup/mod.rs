//! Markup records as exchanged with the viewer.
//!
//! The viewer owns the live collection; records here are opaque JSON objects
//! that only expose the two fields this crate interprets: `id` and `type`.

pub mod batch;
pub mod codec;
pub mod executor;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub use batch::{BatchError, BatchMode, BatchResult};
pub use codec::{decode, encode, CodecError, CodecResult};
pub use executor::{
    BatchReport, ExecutorError, ExecutorResult, ItemAction, ItemOutcome, MarkupExecutor,
};

pub const ID_FIELD: &str = "id";
pub const TYPE_FIELD: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkupType {
    Arrow,
    CloudRectWithText,
    Rect,
    Circle,
    Dot,
}

impl MarkupType {
    pub const ALL: [MarkupType; 5] = [
        Self::Arrow,
        Self::CloudRectWithText,
        Self::Rect,
        Self::Circle,
        Self::Dot,
    ];

    /// Identifier shared by the viewer's tool API and the toolbar buttons.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arrow => "ArrowMarkup",
            Self::CloudRectWithText => "CloudRectWithTextMarkup",
            Self::Rect => "RectMarkup",
            Self::Circle => "CircleMarkup",
            Self::Dot => "DotMarkup",
        }
    }

    const fn short_name(self) -> &'static str {
        match self {
            Self::Arrow => "Arrow",
            Self::CloudRectWithText => "CloudRectWithText",
            Self::Rect => "Rect",
            Self::Circle => "Circle",
            Self::Dot => "Dot",
        }
    }

    /// Parses either the full identifier (`ArrowMarkup`) or the short name (`Arrow`).
    pub fn from_identifier(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value || kind.short_name() == value)
    }
}

impl fmt::Display for MarkupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a markup; the viewer may hand out strings or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkupId {
    Number(Number),
    Text(String),
}

/// Floats are exact integers up to this magnitude.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

impl MarkupId {
    /// Integral floats (`1.0`) are read as the integer they denote, so they
    /// match and print like `1`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(Self::Number(integral_number(number))),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

fn integral_number(number: &Number) -> Number {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() <= MAX_EXACT_FLOAT_INT =>
        {
            if float >= 0.0 {
                Number::from(float as u64)
            } else {
                Number::from(float as i64)
            }
        }
        _ => number.clone(),
    }
}

impl fmt::Display for MarkupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u64> for MarkupId {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for MarkupId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MarkupId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single markup as an ordered JSON object.
///
/// Geometry and style fields are carried verbatim so that a record read from
/// the viewer can be written back without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupRecord(Map<String, Value>);

impl MarkupRecord {
    pub fn new(id: impl Into<MarkupId>, markup_type: MarkupType) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id.into().to_value());
        fields.insert(
            TYPE_FIELD.to_string(),
            Value::String(markup_type.as_str().to_string()),
        );
        Self(fields)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.0.insert(name.into(), value);
        self
    }

    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn id(&self) -> Option<MarkupId> {
        self.0.get(ID_FIELD).and_then(MarkupId::from_value)
    }

    pub fn markup_type(&self) -> Option<MarkupType> {
        self.0
            .get(TYPE_FIELD)
            .and_then(Value::as_str)
            .and_then(MarkupType::from_identifier)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Overwrites the fields present in `patch`, keeping everything else.
    pub fn apply_patch(&mut self, patch: &MarkupRecord) {
        for (name, value) in &patch.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }
}
