//! Control handlers. Each one reads what it needs, calls into the viewer
//! through the tool machine or the executor, and writes a status line.

use super::{App, ControlId};
use crate::error::AppResult;
use crate::markup::{decode, encode, BatchReport};
use crate::state::ToolState;
use crate::ui::ToolbarButton;
use crate::viewer::MarkupViewer;

impl<V: MarkupViewer> App<V> {
    pub(super) fn on_tool_button(&mut self, control: ControlId) -> AppResult<()> {
        let ControlId::Toolbar(ToolbarButton::Tool(markup_type)) = control else {
            return Ok(());
        };
        let state = self.tools.select(markup_type, &mut self.toolbar)?;
        let status = match state {
            ToolState::Active(active) => format!("markup tool selected: {active}"),
            ToolState::Idle => format!("markup tool released: {markup_type}"),
        };
        self.panel.push_status(status);
        Ok(())
    }

    pub(super) fn on_clear_button(&mut self, _control: ControlId) -> AppResult<()> {
        self.tools.clear_markups();
        self.panel.push_status("cleared all markups");
        Ok(())
    }

    pub(super) fn on_manage_button(&mut self, _control: ControlId) -> AppResult<()> {
        let visible = self.panel.toggle_visibility();
        self.toolbar.set_indicator(ToolbarButton::Manage, visible);
        tracing::info!(visible, "toggled markup data panel");
        Ok(())
    }

    pub(super) fn on_get_data(&mut self, _control: ControlId) -> AppResult<()> {
        let records = self.executor.snapshot();
        let text = encode(&records)?;
        tracing::info!(count = records.len(), "fetched markups");
        self.panel.set_text(text);
        self.panel
            .push_status(format!("fetched {} markups", records.len()));
        Ok(())
    }

    pub(super) fn on_set_data(&mut self, _control: ControlId) -> AppResult<()> {
        let items = decode(self.panel.text())?;
        let installed = self.executor.replace_all(items)?;
        self.panel
            .push_status(format!("replaced markups with {installed} records"));
        Ok(())
    }

    pub(super) fn on_update_data(&mut self, _control: ControlId) -> AppResult<()> {
        let items = decode(self.panel.text())?;
        let report = self.executor.update_each(items)?;
        self.push_report(&report);
        Ok(())
    }

    pub(super) fn on_remove_data(&mut self, _control: ControlId) -> AppResult<()> {
        let items = decode(self.panel.text())?;
        let report = self.executor.remove_each(items)?;
        self.push_report(&report);
        Ok(())
    }

    fn push_report(&mut self, report: &BatchReport) {
        for line in report.status_lines() {
            self.panel.push_status(line);
        }
    }
}
