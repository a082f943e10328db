use thiserror::Error;

use super::model::ToolState;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("viewer reports {reported} after a transition to {expected}")]
    ViewerOutOfSync {
        expected: ToolState,
        reported: ToolState,
    },
}
