use crate::markup::{CodecError, ExecutorError};
use crate::state::StateError;
use crate::viewer::ViewerError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error(transparent)]
    Viewer(#[from] ViewerError),
    #[error("unknown control: {identifier}")]
    UnknownControl { identifier: String },
    #[error("session already started")]
    AlreadyStarted,
}
