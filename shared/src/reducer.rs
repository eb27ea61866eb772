//! Flow reduction: pick which documents represent each fulfillment flow
//!
//! Documents are walked customer-facing first. A done document whose
//! quantities were entirely handed to downstream documents is replaced by
//! those downstream documents; everything else is shown as-is.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::graph::{FlowIndex, SuccessorMap};
use crate::models::{DocumentState, FulfillmentDocument, TypeCode};
use crate::types::DocumentId;

/// Documents already emitted (or replaced) during one reduction
#[derive(Debug, Default)]
pub struct ShownSet(HashSet<DocumentId>);

impl ShownSet {
    pub fn contains(&self, id: DocumentId) -> bool {
        self.0.contains(&id)
    }

    pub fn mark(&mut self, id: DocumentId) {
        self.0.insert(id);
    }
}

/// Processing rank: outgoing, then internal, then everything else
pub fn type_rank(code: Option<&TypeCode>) -> u8 {
    match code {
        Some(TypeCode::Outgoing) => 0,
        Some(TypeCode::Internal) => 1,
        Some(TypeCode::Incoming) | Some(TypeCode::Other(_)) | None => 2,
    }
}

/// Display rank: done, then assigned, then everything else
pub fn display_rank(state: &DocumentState) -> u8 {
    match state {
        DocumentState::Done => 0,
        DocumentState::Assigned => 1,
        _ => 2,
    }
}

/// Sort documents into processing order.
///
/// Documents without a scheduled date take `now`, so they land after
/// dated documents of the same type rank.
pub fn processing_order<'a>(
    documents: &[&'a FulfillmentDocument],
    now: DateTime<Utc>,
) -> Vec<&'a FulfillmentDocument> {
    let mut ordered = documents.to_vec();
    ordered.sort_by_key(|document| {
        (
            type_rank(document.type_code.as_ref()),
            document.scheduled_date.unwrap_or(now),
        )
    });
    ordered
}

/// Whether every active movement of `document` was handed on in full.
///
/// A document with no active movements is vacuously consumed.
pub fn is_fully_consumed(document: &FulfillmentDocument, index: &FlowIndex<'_>) -> bool {
    document.active_movements().all(|movement| {
        let mut has_successor = false;
        let mut successor_demand = Decimal::ZERO;
        for (dest, owner) in index.successors_of(movement) {
            if dest.is_active() && owner.is_active() {
                has_successor = true;
                successor_demand += dest.demand;
            }
        }
        has_successor && successor_demand >= movement.quantity
    })
}

/// Reduce the active documents of an order to the ones worth displaying.
///
/// The result is deduplicated by id and sorted by display rank, then name.
pub fn reduce_flows<'a>(
    active: &[&'a FulfillmentDocument],
    successors: &SuccessorMap,
    index: &FlowIndex<'a>,
    now: DateTime<Utc>,
) -> Vec<&'a FulfillmentDocument> {
    let mut shown = ShownSet::default();
    let mut emitted: Vec<&'a FulfillmentDocument> = Vec::new();

    for document in processing_order(active, now) {
        if shown.contains(document.id) {
            continue;
        }
        emit_flow(document, successors, index, &mut shown, &mut emitted);
    }

    let mut chosen = dedup_by_id(emitted);
    chosen.sort_by(|a, b| display_order(a, b));
    chosen
}

/// Emit `document`, or its downstream documents when it was consumed in full.
///
/// Downstream documents that are themselves fully consumed resolve further
/// along the flow. Anything already in `shown` is not visited again.
fn emit_flow<'a>(
    document: &'a FulfillmentDocument,
    successors: &SuccessorMap,
    index: &FlowIndex<'a>,
    shown: &mut ShownSet,
    emitted: &mut Vec<&'a FulfillmentDocument>,
) {
    shown.mark(document.id);

    let collapses = document.state == DocumentState::Done
        && successors.has_successors(document.id)
        && is_fully_consumed(document, index);
    if !collapses {
        emitted.push(document);
        return;
    }

    tracing::debug!(document = %document.name, "Collapsing fully consumed document");
    for next_id in successors.successors(document.id) {
        if shown.contains(next_id) {
            continue;
        }
        if let Some(next) = index.document(next_id) {
            emit_flow(next, successors, index, shown, emitted);
        }
    }
}

fn dedup_by_id(documents: Vec<&FulfillmentDocument>) -> Vec<&FulfillmentDocument> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|document| seen.insert(document.id))
        .collect()
}

fn display_order(a: &FulfillmentDocument, b: &FulfillmentDocument) -> Ordering {
    display_rank(&a.state)
        .cmp(&display_rank(&b.state))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_successor_map;
    use crate::test_support::*;

    fn reduce(documents: &[FulfillmentDocument]) -> Vec<String> {
        let index = FlowIndex::new(documents);
        let active: Vec<&FulfillmentDocument> =
            documents.iter().filter(|d| d.is_active()).collect();
        let map = build_successor_map(&active, &index);
        reduce_flows(&active, &map, &index, at(20))
            .into_iter()
            .map(|document| document.name.clone())
            .collect()
    }

    #[test]
    fn test_type_rank() {
        assert_eq!(type_rank(Some(&TypeCode::Outgoing)), 0);
        assert_eq!(type_rank(Some(&TypeCode::Internal)), 1);
        assert_eq!(type_rank(Some(&TypeCode::Incoming)), 2);
        assert_eq!(type_rank(Some(&TypeCode::from("mrp_operation"))), 2);
        assert_eq!(type_rank(None), 2);
    }

    #[test]
    fn test_processing_order_prefers_outgoing_then_date() {
        let mut late_out = document(
            1,
            "OUT/2",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![],
        );
        late_out.scheduled_date = Some(at(9));
        let mut early_out = document(
            2,
            "OUT/1",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![],
        );
        early_out.scheduled_date = Some(at(3));
        let internal = document(3, "INT/1", DocumentState::Assigned, TypeCode::Internal, vec![]);
        let mut undated_out =
            document(4, "OUT/3", DocumentState::Assigned, TypeCode::Outgoing, vec![]);
        undated_out.scheduled_date = None;

        let input = vec![&internal, &undated_out, &late_out, &early_out];
        let names: Vec<&str> = processing_order(&input, at(20))
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();

        assert_eq!(names, vec!["OUT/1", "OUT/2", "OUT/3", "INT/1"]);
    }

    #[test]
    fn test_full_chain_collapses_to_last_document() {
        assert_eq!(reduce(&three_step_chain()), vec!["WH/OUT/00001"]);
    }

    #[test]
    fn test_partial_consumption_keeps_upstream_document() {
        let mut pick = document(
            1,
            "WH/PICK/00001",
            DocumentState::Done,
            TypeCode::Internal,
            vec![movement(11, 10, 10)],
        );
        let mut pack = document(
            2,
            "WH/PACK/00001",
            DocumentState::Assigned,
            TypeCode::Internal,
            vec![movement(21, 6, 0)],
        );
        link(&mut pick, 0, &mut pack, 0);

        assert_eq!(reduce(&[pick, pack]), vec!["WH/PICK/00001", "WH/PACK/00001"]);
    }

    #[test]
    fn test_split_successors_cover_full_quantity() {
        let mut pick = document(
            1,
            "WH/PICK/00001",
            DocumentState::Done,
            TypeCode::Internal,
            vec![movement(11, 10, 10)],
        );
        let mut out_a = document(
            2,
            "WH/OUT/00001",
            DocumentState::Done,
            TypeCode::Outgoing,
            vec![movement(21, 6, 6)],
        );
        let mut out_b = document(
            3,
            "WH/OUT/00002",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![movement(31, 4, 0)],
        );
        link(&mut pick, 0, &mut out_a, 0);
        link(&mut pick, 0, &mut out_b, 0);

        assert_eq!(reduce(&[pick, out_a, out_b]), vec!["WH/OUT/00001", "WH/OUT/00002"]);
    }

    #[test]
    fn test_not_done_document_is_shown_even_with_successors() {
        let mut documents = three_step_chain();
        documents[0].state = DocumentState::Assigned;

        assert_eq!(reduce(&documents), vec!["WH/OUT/00001", "WH/PICK/00001"]);
    }

    #[test]
    fn test_cancelled_successor_movement_breaks_consumption() {
        let mut documents = three_step_chain();
        documents[2].movements[0].state = DocumentState::Cancel;

        // pack keeps its edge to ship but nothing active receives its quantity
        assert_eq!(reduce(&documents), vec!["WH/PACK/00001", "WH/OUT/00001"]);
    }

    #[test]
    fn test_document_without_movements_is_vacuously_consumed() {
        let mut pick = document(
            1,
            "WH/PICK/00001",
            DocumentState::Done,
            TypeCode::Internal,
            vec![],
        );
        let mut ship = document(
            2,
            "WH/OUT/00001",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![movement(21, 3, 0)],
        );
        // a cancelled movement still carries the link that creates the edge
        pick.movements.push(movement(11, 3, 3));
        link(&mut pick, 0, &mut ship, 0);
        pick.movements[0].state = DocumentState::Cancel;

        let index = FlowIndex::new([&pick, &ship]);
        assert!(is_fully_consumed(&pick, &index));
        // cancelled movements add no edge, so the document has nothing to collapse into
        assert_eq!(reduce(&[pick, ship]), vec!["WH/PICK/00001", "WH/OUT/00001"]);
    }

    #[test]
    fn test_successor_shown_once_when_reached_twice() {
        let mut pick_a = document(
            1,
            "WH/PICK/00001",
            DocumentState::Done,
            TypeCode::Internal,
            vec![movement(11, 5, 5)],
        );
        let mut pick_b = document(
            2,
            "WH/PICK/00002",
            DocumentState::Done,
            TypeCode::Internal,
            vec![movement(12, 5, 5)],
        );
        let mut ship = document(
            3,
            "WH/OUT/00001",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![movement(31, 5, 0), movement(32, 5, 0)],
        );
        // processed after both picks, so each pick reaches it first
        ship.type_code = Some(TypeCode::Internal);
        ship.scheduled_date = Some(at(25));
        link(&mut pick_a, 0, &mut ship, 0);
        link(&mut pick_b, 0, &mut ship, 1);

        assert_eq!(reduce(&[pick_a, pick_b, ship]), vec!["WH/OUT/00001"]);
    }

    #[test]
    fn test_display_order_done_then_assigned_then_name() {
        let docs = [
            document(1, "B", DocumentState::Assigned, TypeCode::Outgoing, vec![]),
            document(2, "A", DocumentState::Done, TypeCode::Outgoing, vec![]),
            document(3, "C", DocumentState::Waiting, TypeCode::Outgoing, vec![]),
        ];

        assert_eq!(reduce(&docs), vec!["A", "B", "C"]);
    }
}
