//! Snapshot checks applied by hosts before computing the tracker
//!
//! The projection never fails on its own; a host that receives a snapshot
//! from outside uses these checks to reject references it cannot resolve.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{TrackerError, TrackerResult};
use crate::models::FulfillmentSnapshot;

/// Validate ids, links and quantities of a snapshot
pub fn validate_snapshot(snapshot: &FulfillmentSnapshot) -> TrackerResult<()> {
    let mut document_ids = HashSet::new();
    let mut movement_ids = HashSet::new();

    for document in &snapshot.documents {
        if !document_ids.insert(document.id) {
            return Err(TrackerError::DuplicateDocument(document.id));
        }
        for movement in &document.movements {
            if !movement_ids.insert(movement.id) {
                return Err(TrackerError::DuplicateMovement(movement.id));
            }
            if movement.demand < Decimal::ZERO || movement.quantity < Decimal::ZERO {
                return Err(TrackerError::NegativeQuantity(movement.id));
            }
        }
    }

    for movement in snapshot.documents.iter().flat_map(|d| &d.movements) {
        let linked = movement
            .dest_movement_ids
            .iter()
            .chain(&movement.orig_movement_ids);
        for linked_id in linked {
            if !movement_ids.contains(linked_id) {
                return Err(TrackerError::DanglingMovement {
                    movement: movement.id,
                    missing: *linked_id,
                });
            }
        }
    }

    Ok(())
}

/// Check the snapshot stays within a document limit
pub fn validate_document_count(snapshot: &FulfillmentSnapshot, max: usize) -> TrackerResult<()> {
    let count = snapshot.documents.len();
    if count > max {
        return Err(TrackerError::TooManyDocuments { count, max });
    }
    Ok(())
}
