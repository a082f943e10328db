pub mod panel;
pub mod toolbar;

pub use panel::{DataButton, MarkupPanel, DATA_BUTTON_ENTRIES};
pub use toolbar::{ToolbarButton, ToolbarState, TOOLBAR_ENTRIES};
