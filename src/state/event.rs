use crate::markup::MarkupType;

use super::model::ToolState;

/// Side effect issued while switching tools, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    Deactivate(MarkupType),
    ClearIndicator(MarkupType),
    Activate(MarkupType),
    SetIndicator(MarkupType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTransition {
    pub from: ToolState,
    pub selected: MarkupType,
    pub to: ToolState,
    pub effects: Vec<ToolEffect>,
}

impl ToolTransition {
    pub fn new(
        from: ToolState,
        selected: MarkupType,
        to: ToolState,
        effects: Vec<ToolEffect>,
    ) -> Self {
        Self {
            from,
            selected,
            to,
            effects,
        }
    }
}
