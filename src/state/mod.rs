pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{ToolEffect, ToolTransition};
pub use machine::{plan_tool_selection, ToolActivation};
pub use model::ToolState;
