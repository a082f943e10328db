//! Boundary with the embedded drawing viewer.
//!
//! The viewer owns the live markup collection and the active drawing tool.
//! Nothing on this side caches either; every read goes through the trait.

mod memory;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markup::{MarkupId, MarkupRecord, MarkupType};

pub use memory::{InMemoryViewer, ViewerCall};

pub type ViewerResult<T> = std::result::Result<T, ViewerError>;

/// Shared handle to the single viewer instance of a session.
pub type ViewerHandle<V> = Rc<RefCell<V>>;

pub type ProgressCallback = Box<dyn FnMut(&LoadProgress)>;
pub type LoadContinuation = Box<dyn FnOnce(ViewerResult<()>)>;
pub type EventListener = Box<dyn FnMut(&ViewerEvent)>;

pub fn viewer_handle<V>(viewer: V) -> ViewerHandle<V> {
    Rc::new(RefCell::new(viewer))
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("viewer rejected markups: {reason}")]
    Rejected { reason: String },
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },
    #[error("failed to load model {src}: {reason}")]
    ModelLoad { src: String, reason: String },
}

/// Construction settings for the viewer canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    pub container_id: String,
    pub enable_spinner: bool,
    pub enable_progress_bar: bool,
    pub enable_layout_bar: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            container_id: "myCanvas".to_string(),
            enable_spinner: true,
            enable_progress_bar: true,
            enable_layout_bar: true,
        }
    }
}

/// Model file handed to the viewer for loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub model_id: String,
    pub name: String,
    pub src: String,
    #[serde(default)]
    pub merge: bool,
}

impl ModelDescriptor {
    pub fn dxf(file_stem: &str) -> Self {
        Self {
            model_id: file_stem.to_string(),
            name: file_stem.to_string(),
            src: format!("/public/model/{file_stem}.dxf"),
            merge: true,
        }
    }
}

impl Default for ModelDescriptor {
    fn default() -> Self {
        Self::dxf("rac_basic_sample_project")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    pub kind: String,
    pub loaded: u64,
    pub total: u64,
}

impl LoadProgress {
    /// `None` while the total size is still unknown.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.loaded as f64 * 100.0 / self.total as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// A click on the canvas; `markup` is empty when nothing was hit.
    MarkupClicked { markup: Option<MarkupRecord> },
}

pub trait MarkupViewer {
    fn markups(&self) -> Vec<MarkupRecord>;
    fn set_markups(&mut self, records: Vec<MarkupRecord>) -> ViewerResult<()>;
    fn update_markup(&mut self, record: &MarkupRecord) -> bool;
    fn remove_markup(&mut self, id: &MarkupId) -> bool;
    fn clear_markups(&mut self);

    fn activate_markup(&mut self, markup_type: MarkupType);
    fn deactivate_markup(&mut self, markup_type: MarkupType);
    fn active_markup_type(&self) -> Option<MarkupType>;

    fn set_font(&mut self, font_files: &[PathBuf]) -> ViewerResult<()>;
    /// Starts loading without blocking; progress and completion arrive later.
    fn load_model(
        &mut self,
        model: &ModelDescriptor,
        on_progress: ProgressCallback,
        on_complete: LoadContinuation,
    );
    fn enable_axis_gizmo(&mut self, ignore_z_axis: bool);
    fn subscribe(&mut self, listener: EventListener);
}
