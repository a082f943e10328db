use std::fmt;

use crate::markup::MarkupType;

/// At most one drawing tool is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Active(MarkupType),
}

impl ToolState {
    pub const fn from_active(active: Option<MarkupType>) -> Self {
        match active {
            Some(markup_type) => Self::Active(markup_type),
            None => Self::Idle,
        }
    }

    pub const fn active_tool(self) -> Option<MarkupType> {
        match self {
            Self::Idle => None,
            Self::Active(markup_type) => Some(markup_type),
        }
    }
}

impl fmt::Display for ToolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Active(markup_type) => write!(f, "Active({markup_type})"),
        }
    }
}
