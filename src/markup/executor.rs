//! Applies decoded batches to the viewer's live collection.

use serde_json::Value;
use thiserror::Error;

use super::batch::{self, BatchError, BatchMode};
use super::{MarkupId, MarkupRecord};
use crate::viewer::{MarkupViewer, ViewerError, ViewerHandle};

pub type ExecutorResult<T> = std::result::Result<T, ExecutorError>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    MalformedBatch(#[from] BatchError),
    #[error("viewer refused the {mode} batch: {source}")]
    Viewer {
        mode: BatchMode,
        #[source]
        source: ViewerError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub id: MarkupId,
    pub succeeded: bool,
}

/// Per-item viewer operation; a whole-collection replace has no per-item outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Update,
    Remove,
}

impl ItemAction {
    pub const fn batch_mode(self) -> BatchMode {
        match self {
            Self::Update => BatchMode::Update,
            Self::Remove => BatchMode::Remove,
        }
    }

    const fn verb(self, succeeded: bool) -> &'static str {
        match (self, succeeded) {
            (Self::Update, true) => "Updated",
            (Self::Update, false) => "Failed to update",
            (Self::Remove, true) => "Removed",
            (Self::Remove, false) => "Failed to remove",
        }
    }
}

/// Per-item result of an update or remove batch, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub action: ItemAction,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    fn new(action: ItemAction, capacity: usize) -> Self {
        Self {
            action,
            outcomes: Vec::with_capacity(capacity),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|item| item.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn status_line(&self, outcome: &ItemOutcome) -> String {
        let verb = self.action.verb(outcome.succeeded);
        format!("{verb} markup with id: {}", outcome.id)
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(|outcome| self.status_line(outcome))
            .collect()
    }
}

pub struct MarkupExecutor<V: MarkupViewer> {
    viewer: ViewerHandle<V>,
}

impl<V: MarkupViewer> MarkupExecutor<V> {
    pub fn new(viewer: ViewerHandle<V>) -> Self {
        Self { viewer }
    }

    pub fn snapshot(&self) -> Vec<MarkupRecord> {
        self.viewer.borrow().markups()
    }

    /// Swaps the whole collection in a single viewer call.
    ///
    /// Returns the number of markups installed.
    pub fn replace_all(&self, items: Vec<Value>) -> ExecutorResult<usize> {
        let records = batch::validate_replacement(items)?;
        let count = records.len();
        self.viewer
            .borrow_mut()
            .set_markups(records)
            .map_err(|source| ExecutorError::Viewer {
                mode: BatchMode::Replace,
                source,
            })?;
        tracing::info!(count, "replaced markup collection");
        Ok(count)
    }

    /// Updates each item by id; a failed item does not stop the rest.
    pub fn update_each(&self, items: Vec<Value>) -> ExecutorResult<BatchReport> {
        let patches = batch::validate_patches(items)?;
        let mut report = BatchReport::new(ItemAction::Update, patches.len());
        for (id, patch) in patches {
            let succeeded = self.viewer.borrow_mut().update_markup(&patch);
            record_outcome(&mut report, ItemOutcome { id, succeeded });
        }
        Ok(report)
    }

    /// Removes each item by id; a failed item does not stop the rest.
    pub fn remove_each(&self, items: Vec<Value>) -> ExecutorResult<BatchReport> {
        let ids = batch::validate_removals(items)?;
        let mut report = BatchReport::new(ItemAction::Remove, ids.len());
        for id in ids {
            let succeeded = self.viewer.borrow_mut().remove_markup(&id);
            record_outcome(&mut report, ItemOutcome { id, succeeded });
        }
        Ok(report)
    }
}

fn record_outcome(report: &mut BatchReport, outcome: ItemOutcome) {
    let line = report.status_line(&outcome);
    let mode = report.action.batch_mode();
    if outcome.succeeded {
        tracing::info!(%mode, "{line}");
    } else {
        tracing::warn!(%mode, "{line}");
    }
    report.outcomes.push(outcome);
}
