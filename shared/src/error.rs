//! Error types for the tracker crate
//!
//! The projection itself is total; these errors only come from checking
//! host-supplied snapshots and from serializing the payload.

use thiserror::Error;

use crate::types::{DocumentId, MovementId};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Duplicate document id: {0}")]
    DuplicateDocument(DocumentId),

    #[error("Duplicate movement id: {0}")]
    DuplicateMovement(MovementId),

    #[error("Movement {movement} references unknown movement {missing}")]
    DanglingMovement {
        movement: MovementId,
        missing: MovementId,
    },

    #[error("Movement {0} has a negative quantity")]
    NegativeQuantity(MovementId),

    #[error("Snapshot has {count} documents, the limit is {max}")]
    TooManyDocuments { count: usize, max: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
