//! Markup data panel: the editable text area and its four action buttons.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataButton {
    Get,
    Set,
    Update,
    Remove,
}

impl DataButton {
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Get => "GetMarkupData",
            Self::Set => "SetMarkupData",
            Self::Update => "UpdateMarkupData",
            Self::Remove => "RemoveMarkupData",
        }
    }

    pub fn from_identifier(value: &str) -> Option<Self> {
        DATA_BUTTON_ENTRIES
            .iter()
            .map(|(button, _, _)| *button)
            .find(|button| button.identifier() == value)
    }
}

pub const DATA_BUTTON_ENTRIES: [(DataButton, &str, &str); 4] = [
    (DataButton::Get, "Get", "Get all markups"),
    (DataButton::Set, "Set", "Reset markups"),
    (DataButton::Update, "Update", "Update one or more markups"),
    (DataButton::Remove, "Remove", "Remove one or more markups"),
];

const STATUS_LOG_LIMIT: usize = 200;

/// Hidden until the manage button is pressed. The text is only read when a
/// data button asks for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupPanel {
    visible: bool,
    text: String,
    status_log: VecDeque<String>,
}

impl MarkupPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the new visibility.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_status(&mut self, line: impl Into<String>) {
        if self.status_log.len() == STATUS_LOG_LIMIT {
            self.status_log.pop_front();
        }
        self.status_log.push_back(line.into());
    }

    pub fn status_log(&self) -> &VecDeque<String> {
        &self.status_log
    }

    pub fn last_status(&self) -> Option<&str> {
        self.status_log.back().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_hidden_and_toggles() {
        let mut panel = MarkupPanel::new();
        assert!(!panel.is_visible());
        assert!(panel.toggle_visibility());
        assert!(!panel.toggle_visibility());
    }

    #[test]
    fn status_log_drops_oldest_lines_past_limit() {
        let mut panel = MarkupPanel::new();
        for index in 0..STATUS_LOG_LIMIT + 2 {
            panel.push_status(format!("line {index}"));
        }
        assert_eq!(panel.status_log().len(), STATUS_LOG_LIMIT);
        assert_eq!(panel.status_log()[0], "line 2");
        assert_eq!(
            panel.last_status(),
            Some(format!("line {}", STATUS_LOG_LIMIT + 1).as_str())
        );
    }

    #[test]
    fn data_button_identifiers_round_trip() {
        for (button, _, _) in DATA_BUTTON_ENTRIES {
            assert_eq!(DataButton::from_identifier(button.identifier()), Some(button));
        }
    }
}
