//! Shape checks run over a whole decoded batch before the viewer is touched.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::{MarkupId, MarkupRecord, MarkupType, ID_FIELD, TYPE_FIELD};

pub type BatchResult<T> = std::result::Result<T, BatchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    Replace,
    Update,
    Remove,
}

impl BatchMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Replace => "set",
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("malformed {mode} batch: item {index} is not a JSON object")]
    NotAnObject { mode: BatchMode, index: usize },
    #[error("malformed {mode} batch: item {index} has no `id`")]
    MissingId { mode: BatchMode, index: usize },
    #[error("malformed {mode} batch: item {index} has an `id` that is neither a string nor a number")]
    InvalidId { mode: BatchMode, index: usize },
    #[error("malformed {mode} batch: item {index} has no `type`")]
    MissingType { mode: BatchMode, index: usize },
    #[error("malformed {mode} batch: item {index} has unknown type {value}")]
    UnknownType {
        mode: BatchMode,
        index: usize,
        value: String,
    },
    #[error("malformed {mode} batch: id {id} appears more than once")]
    DuplicateId { mode: BatchMode, id: MarkupId },
}

/// Full records for a replace-all: typed, identified and unique by id.
pub fn validate_replacement(items: Vec<Value>) -> BatchResult<Vec<MarkupRecord>> {
    let mode = BatchMode::Replace;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = into_record(mode, index, item)?;
        let id = required_id(mode, index, &record)?;
        required_type(mode, index, &record)?;
        if !seen.insert(id.clone()) {
            return Err(BatchError::DuplicateId { mode, id });
        }
        records.push(record);
    }
    Ok(records)
}

/// Partial records for update: only `id` is mandatory.
pub fn validate_patches(items: Vec<Value>) -> BatchResult<Vec<(MarkupId, MarkupRecord)>> {
    let mode = BatchMode::Update;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record = into_record(mode, index, item)?;
            let id = required_id(mode, index, &record)?;
            Ok((id, record))
        })
        .collect()
}

/// Ids to remove; every other field of an item is ignored.
pub fn validate_removals(items: Vec<Value>) -> BatchResult<Vec<MarkupId>> {
    let mode = BatchMode::Remove;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record = into_record(mode, index, item)?;
            required_id(mode, index, &record)
        })
        .collect()
}

fn into_record(mode: BatchMode, index: usize, item: Value) -> BatchResult<MarkupRecord> {
    MarkupRecord::from_value(item).ok_or(BatchError::NotAnObject { mode, index })
}

fn required_id(mode: BatchMode, index: usize, record: &MarkupRecord) -> BatchResult<MarkupId> {
    let value = record
        .get(ID_FIELD)
        .ok_or(BatchError::MissingId { mode, index })?;
    MarkupId::from_value(value).ok_or(BatchError::InvalidId { mode, index })
}

fn required_type(mode: BatchMode, index: usize, record: &MarkupRecord) -> BatchResult<MarkupType> {
    let value = record
        .get(TYPE_FIELD)
        .ok_or(BatchError::MissingType { mode, index })?;
    value
        .as_str()
        .and_then(MarkupType::from_identifier)
        .ok_or_else(|| BatchError::UnknownType {
            mode,
            index,
            value: value.to_string(),
        })
}
