//! Session area error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionAreaError {
    #[error("Star count cannot be negative: {0}")]
    NegativeStars(i64),

    #[error("Session area id cannot be empty")]
    EmptyId,
}
