use std::collections::BTreeSet;

use crate::markup::MarkupType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolbarButton {
    Tool(MarkupType),
    Clear,
    Manage,
}

impl ToolbarButton {
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Tool(markup_type) => markup_type.as_str(),
            Self::Clear => "ClearMarkups",
            Self::Manage => "ManageMarkups",
        }
    }

    pub fn from_identifier(value: &str) -> Option<Self> {
        TOOLBAR_ENTRIES
            .iter()
            .map(|(button, _, _)| *button)
            .find(|button| button.identifier() == value)
    }
}

/// Toolbar buttons in display order with their caption and tooltip.
pub const TOOLBAR_ENTRIES: [(ToolbarButton, &str, Option<&str>); 7] = [
    (ToolbarButton::Tool(MarkupType::Arrow), "Arrow", None),
    (
        ToolbarButton::Tool(MarkupType::CloudRectWithText),
        "CloudRect",
        None,
    ),
    (ToolbarButton::Tool(MarkupType::Rect), "Rect", None),
    (ToolbarButton::Tool(MarkupType::Circle), "Circle", None),
    (ToolbarButton::Tool(MarkupType::Dot), "Dot", None),
    (ToolbarButton::Clear, "Clear", Some("Clear all markups")),
    (
        ToolbarButton::Manage,
        "View data",
        Some("View and manage markup data"),
    ),
];

/// Which toolbar buttons currently show the "active" indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarState {
    active: BTreeSet<ToolbarButton>,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_indicator(&mut self, button: ToolbarButton, active: bool) {
        if active {
            self.active.insert(button);
        } else {
            self.active.remove(&button);
        }
    }

    /// Lights the indicator of `active` and clears every other tool indicator.
    pub fn show_active_tool(&mut self, active: Option<MarkupType>) {
        self.active
            .retain(|button| !matches!(button, ToolbarButton::Tool(_)));
        if let Some(markup_type) = active {
            self.active.insert(ToolbarButton::Tool(markup_type));
        }
    }

    pub fn is_active(&self, button: ToolbarButton) -> bool {
        self.active.contains(&button)
    }

    pub fn active_buttons(&self) -> Vec<ToolbarButton> {
        self.active.iter().copied().collect()
    }

    pub fn active_tools(&self) -> Vec<MarkupType> {
        self.active
            .iter()
            .filter_map(|button| match button {
                ToolbarButton::Tool(markup_type) => Some(*markup_type),
                _ => None,
            })
            .collect()
    }
}
