//! Error types for the runtime layer.

use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("control error: {0}")]
    Control(#[from] bf_control::ControlError),

    #[error("store error: {0}")]
    Store(#[from] bf_store::StoreError),
}
