use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{
    EventListener, LoadContinuation, LoadProgress, MarkupViewer, ModelDescriptor,
    ProgressCallback, ViewerError, ViewerEvent, ViewerResult, ViewerSettings,
};
use crate::markup::{MarkupId, MarkupRecord, MarkupType};

const SUPPORTED_FONT_EXTENSIONS: &[&str] = &["shx", "ttf", "otf", "woff"];
const DEFAULT_MODEL_SIZE_BYTES: u64 = 4096;
const LOAD_PROGRESS_STEPS: u64 = 4;

/// Mutating calls received by [`InMemoryViewer`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCall {
    SetMarkups { count: usize },
    UpdateMarkup { id: Option<MarkupId> },
    RemoveMarkup { id: MarkupId },
    ClearMarkups,
    Activate(MarkupType),
    Deactivate(MarkupType),
    SetFont { count: usize },
    LoadModel { src: String },
    EnableAxisGizmo { ignore_z_axis: bool },
}

struct PendingLoad {
    model: ModelDescriptor,
    on_progress: ProgressCallback,
    on_complete: LoadContinuation,
}

/// Headless viewer that keeps markups in memory.
///
/// Placement gestures are simulated with [`InMemoryViewer::place_markup`] and
/// model loading only advances when [`InMemoryViewer::finish_loading`] runs.
pub struct InMemoryViewer {
    settings: ViewerSettings,
    markups: Vec<MarkupRecord>,
    active_tool: Option<MarkupType>,
    locked_ids: HashSet<MarkupId>,
    fonts: Vec<PathBuf>,
    axis_gizmo: Option<bool>,
    pending_load: Option<PendingLoad>,
    loaded_model: Option<ModelDescriptor>,
    model_size: u64,
    listeners: Vec<EventListener>,
    calls: Vec<ViewerCall>,
    next_id: u64,
}

impl Default for InMemoryViewer {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl InMemoryViewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            markups: Vec::new(),
            active_tool: None,
            locked_ids: HashSet::new(),
            fonts: Vec::new(),
            axis_gizmo: None,
            pending_load: None,
            loaded_model: None,
            model_size: DEFAULT_MODEL_SIZE_BYTES,
            listeners: Vec::new(),
            calls: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_markups(mut self, markups: Vec<MarkupRecord>) -> Self {
        self.next_id = next_free_numeric_id(&markups);
        self.markups = markups;
        self
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn calls(&self) -> &[ViewerCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<ViewerCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn fonts(&self) -> &[PathBuf] {
        &self.fonts
    }

    pub fn axis_gizmo(&self) -> Option<bool> {
        self.axis_gizmo
    }

    pub fn loaded_model(&self) -> Option<&ModelDescriptor> {
        self.loaded_model.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Locked markups refuse update and removal.
    pub fn lock(&mut self, id: impl Into<MarkupId>) {
        self.locked_ids.insert(id.into());
    }

    /// Delivers progress for the pending model load and completes it.
    ///
    /// Returns `false` when no load was in flight.
    pub fn finish_loading(&mut self) -> bool {
        let Some(PendingLoad {
            model,
            mut on_progress,
            on_complete,
        }) = self.pending_load.take()
        else {
            return false;
        };

        let step = self.model_size.div_ceil(LOAD_PROGRESS_STEPS).max(1);
        let mut loaded = 0;
        while loaded < self.model_size {
            loaded = (loaded + step).min(self.model_size);
            on_progress(&LoadProgress {
                kind: "progress".to_string(),
                loaded,
                total: self.model_size,
            });
        }
        self.loaded_model = Some(model);
        on_complete(Ok(()));
        true
    }

    /// Simulates a placement gesture with the active tool.
    ///
    /// Nothing is drawn while no tool is active or before the model has loaded.
    pub fn place_markup(&mut self, geometry: Value) -> Option<MarkupId> {
        let markup_type = self.active_tool?;
        self.loaded_model.as_ref()?;

        let id = MarkupId::from(self.allocate_id());
        let mut record = MarkupRecord::new(id.clone(), markup_type);
        if let Some(extra) = MarkupRecord::from_value(geometry) {
            for (name, value) in extra.fields() {
                if name != crate::markup::ID_FIELD && name != crate::markup::TYPE_FIELD {
                    record = record.with_field(name.clone(), value.clone());
                }
            }
        }
        self.markups.push(record);
        Some(id)
    }

    /// Simulates a click on the canvas, hitting the markup with `id` if it exists.
    pub fn click(&mut self, id: &MarkupId) {
        let markup = self.find(id).cloned();
        let event = ViewerEvent::MarkupClicked { markup };
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn allocate_id(&mut self) -> u64 {
        loop {
            let id = self.next_id;
            self.next_id = self.next_id.saturating_add(1);
            if self.find(&MarkupId::from(id)).is_none() {
                return id;
            }
        }
    }

    fn find(&self, id: &MarkupId) -> Option<&MarkupRecord> {
        self.markups
            .iter()
            .find(|record| record.id().as_ref() == Some(id))
    }

    fn find_mut(&mut self, id: &MarkupId) -> Option<&mut MarkupRecord> {
        self.markups
            .iter_mut()
            .find(|record| record.id().as_ref() == Some(id))
    }
}

impl MarkupViewer for InMemoryViewer {
    fn markups(&self) -> Vec<MarkupRecord> {
        self.markups.clone()
    }

    fn set_markups(&mut self, records: Vec<MarkupRecord>) -> ViewerResult<()> {
        self.calls.push(ViewerCall::SetMarkups {
            count: records.len(),
        });
        let mut seen = HashSet::new();
        for record in &records {
            let id = record.id().ok_or_else(|| ViewerError::Rejected {
                reason: "markup without id".to_string(),
            })?;
            if !seen.insert(id.clone()) {
                return Err(ViewerError::Rejected {
                    reason: format!("duplicate id {id}"),
                });
            }
        }
        self.next_id = next_free_numeric_id(&records);
        self.markups = records;
        Ok(())
    }

    fn update_markup(&mut self, record: &MarkupRecord) -> bool {
        let id = record.id();
        self.calls.push(ViewerCall::UpdateMarkup { id: id.clone() });
        let Some(id) = id else {
            return false;
        };
        if self.locked_ids.contains(&id) {
            return false;
        }
        let Some(existing) = self.find_mut(&id) else {
            return false;
        };
        if record.get(crate::markup::TYPE_FIELD).is_some()
            && record.markup_type() != existing.markup_type()
        {
            return false;
        }
        existing.apply_patch(record);
        true
    }

    fn remove_markup(&mut self, id: &MarkupId) -> bool {
        self.calls.push(ViewerCall::RemoveMarkup { id: id.clone() });
        if self.locked_ids.contains(id) {
            return false;
        }
        let before = self.markups.len();
        self.markups
            .retain(|record| record.id().as_ref() != Some(id));
        self.markups.len() != before
    }

    fn clear_markups(&mut self) {
        self.calls.push(ViewerCall::ClearMarkups);
        self.markups.clear();
    }

    fn activate_markup(&mut self, markup_type: MarkupType) {
        self.calls.push(ViewerCall::Activate(markup_type));
        self.active_tool = Some(markup_type);
    }

    fn deactivate_markup(&mut self, markup_type: MarkupType) {
        self.calls.push(ViewerCall::Deactivate(markup_type));
        if self.active_tool == Some(markup_type) {
            self.active_tool = None;
        }
    }

    fn active_markup_type(&self) -> Option<MarkupType> {
        self.active_tool
    }

    fn set_font(&mut self, font_files: &[PathBuf]) -> ViewerResult<()> {
        self.calls.push(ViewerCall::SetFont {
            count: font_files.len(),
        });
        if let Some(path) = font_files.iter().find(|path| !is_supported_font(path)) {
            return Err(ViewerError::FontLoad {
                path: path.clone(),
                reason: "unsupported font format".to_string(),
            });
        }
        self.fonts = font_files.to_vec();
        Ok(())
    }

    fn load_model(
        &mut self,
        model: &ModelDescriptor,
        on_progress: ProgressCallback,
        on_complete: LoadContinuation,
    ) {
        self.calls.push(ViewerCall::LoadModel {
            src: model.src.clone(),
        });
        if model.src.trim().is_empty() {
            on_complete(Err(ViewerError::ModelLoad {
                src: model.src.clone(),
                reason: "empty model source".to_string(),
            }));
            return;
        }
        self.pending_load = Some(PendingLoad {
            model: model.clone(),
            on_progress,
            on_complete,
        });
    }

    fn enable_axis_gizmo(&mut self, ignore_z_axis: bool) {
        self.calls.push(ViewerCall::EnableAxisGizmo { ignore_z_axis });
        self.axis_gizmo = Some(ignore_z_axis);
    }

    fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }
}

fn is_supported_font(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_FONT_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn next_free_numeric_id(records: &[MarkupRecord]) -> u64 {
    records
        .iter()
        .filter_map(|record| match record.id() {
            Some(MarkupId::Number(number)) => number.as_u64(),
            _ => None,
        })
        .max()
        .map_or(1, |max| max.saturating_add(1))
}
