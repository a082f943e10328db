//! Binds toolbar and data-panel controls to the tool machine and the executor.
//!
//! Every handler runs to completion on the event thread. Failures never
//! escape as panics: they are logged, sent to the notifier and written to the
//! panel status log before the error is handed back to the caller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::markup::MarkupExecutor;
use crate::notification::Notifier;
use crate::state::ToolActivation;
use crate::ui::{MarkupPanel, ToolbarState};
use crate::viewer::{MarkupViewer, ViewerHandle};

mod actions;
mod bootstrap;
mod dispatch;

pub use bootstrap::LoadState;
pub use dispatch::{ControlHandler, ControlId};

pub struct App<V: MarkupViewer> {
    viewer: ViewerHandle<V>,
    tools: ToolActivation<V>,
    executor: MarkupExecutor<V>,
    toolbar: ToolbarState,
    panel: MarkupPanel,
    notifier: Rc<dyn Notifier>,
    config: AppConfig,
    load_state: Rc<RefCell<LoadState>>,
    controls: HashMap<ControlId, ControlHandler<V>>,
    started: bool,
}

impl<V: MarkupViewer> App<V> {
    pub fn new(viewer: ViewerHandle<V>, config: AppConfig, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            tools: ToolActivation::new(viewer.clone()),
            executor: MarkupExecutor::new(viewer.clone()),
            viewer,
            toolbar: ToolbarState::new(),
            panel: MarkupPanel::new(),
            notifier,
            config,
            load_state: Rc::new(RefCell::new(LoadState::default())),
            controls: dispatch::control_table(),
            started: false,
        }
    }

    pub fn viewer(&self) -> &ViewerHandle<V> {
        &self.viewer
    }

    pub fn tools(&self) -> &ToolActivation<V> {
        &self.tools
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn panel(&self) -> &MarkupPanel {
        &self.panel
    }

    /// Text edits from the UI land here; nothing reads them until a data button.
    pub fn set_panel_text(&mut self, text: impl Into<String>) {
        self.panel.set_text(text);
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.borrow().clone()
    }

    pub fn dispatch(&mut self, control: ControlId) -> AppResult<()> {
        tracing::debug!(control = control.identifier(), "dispatch control");
        let result = match self.controls.get(&control).copied() {
            Some(handler) => handler(self, control),
            None => Err(AppError::UnknownControl {
                identifier: control.identifier().to_string(),
            }),
        };
        if let Err(err) = &result {
            self.report_failure(err);
        }
        result
    }

    /// Dispatches by the identifier a UI element carries, e.g. `RectMarkup`.
    pub fn dispatch_identifier(&mut self, identifier: &str) -> AppResult<()> {
        match ControlId::from_identifier(identifier) {
            Some(control) => self.dispatch(control),
            None => {
                let err = AppError::UnknownControl {
                    identifier: identifier.to_string(),
                };
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    fn report_failure(&mut self, err: &AppError) {
        let message = err.to_string();
        tracing::warn!(error = %message, "markup action failed");
        self.notifier.notify(&message);
        self.panel.push_status(format!("warning: {message}"));
    }
}
