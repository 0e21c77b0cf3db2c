// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

use crate::engine::Phase;
use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store allocation failed (capacity {requested})")]
    Alloc { requested: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("phase out of order (expected {expected:?}, at {actual:?})")]
    PhaseOrder { expected: Phase, actual: Phase },
}
