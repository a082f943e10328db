use std::collections::HashMap;

use super::App;
use crate::error::AppResult;
use crate::ui::{DataButton, ToolbarButton, DATA_BUTTON_ENTRIES, TOOLBAR_ENTRIES};
use crate::viewer::MarkupViewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Toolbar(ToolbarButton),
    Data(DataButton),
}

impl ControlId {
    /// Every control in toolbar order followed by the data panel buttons.
    pub fn all() -> Vec<ControlId> {
        TOOLBAR_ENTRIES
            .iter()
            .map(|(button, _, _)| Self::Toolbar(*button))
            .chain(
                DATA_BUTTON_ENTRIES
                    .iter()
                    .map(|(button, _, _)| Self::Data(*button)),
            )
            .collect()
    }

    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Toolbar(button) => button.identifier(),
            Self::Data(button) => button.identifier(),
        }
    }

    pub fn from_identifier(value: &str) -> Option<Self> {
        ToolbarButton::from_identifier(value)
            .map(Self::Toolbar)
            .or_else(|| DataButton::from_identifier(value).map(Self::Data))
    }
}

pub type ControlHandler<V> = fn(&mut App<V>, ControlId) -> AppResult<()>;

pub(super) fn control_table<V: MarkupViewer>() -> HashMap<ControlId, ControlHandler<V>> {
    ControlId::all()
        .into_iter()
        .map(|control| (control, handler_for::<V>(control)))
        .collect()
}

fn handler_for<V: MarkupViewer>(control: ControlId) -> ControlHandler<V> {
    match control {
        ControlId::Toolbar(ToolbarButton::Tool(_)) => App::<V>::on_tool_button,
        ControlId::Toolbar(ToolbarButton::Clear) => App::<V>::on_clear_button,
        ControlId::Toolbar(ToolbarButton::Manage) => App::<V>::on_manage_button,
        ControlId::Data(DataButton::Get) => App::<V>::on_get_data,
        ControlId::Data(DataButton::Set) => App::<V>::on_set_data,
        ControlId::Data(DataButton::Update) => App::<V>::on_update_data,
        ControlId::Data(DataButton::Remove) => App::<V>::on_remove_data,
    }
}
