//! Successor graph between fulfillment documents
//!
//! Movement-level successor links are folded into an explicit
//! document-id adjacency map, built once per computation.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{FulfillmentDocument, Movement};
use crate::types::{DocumentId, MovementId};

/// Lookup tables over every document of a snapshot
#[derive(Debug, Default)]
pub struct FlowIndex<'a> {
    documents: HashMap<DocumentId, &'a FulfillmentDocument>,
    movements: HashMap<MovementId, (&'a Movement, &'a FulfillmentDocument)>,
}

impl<'a> FlowIndex<'a> {
    pub fn new<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a FulfillmentDocument>,
    {
        let mut index = Self::default();
        for document in documents {
            index.documents.insert(document.id, document);
            for movement in &document.movements {
                index.movements.insert(movement.id, (movement, document));
            }
        }
        index
    }

    pub fn document(&self, id: DocumentId) -> Option<&'a FulfillmentDocument> {
        self.documents.get(&id).copied()
    }

    /// A movement together with the document that owns it
    pub fn movement(&self, id: MovementId) -> Option<(&'a Movement, &'a FulfillmentDocument)> {
        self.movements.get(&id).copied()
    }

    /// Successor movements of `movement` whose owning document is known
    pub fn successors_of<'m>(
        &'m self,
        movement: &'m Movement,
    ) -> impl Iterator<Item = (&'a Movement, &'a FulfillmentDocument)> + 'm {
        movement
            .dest_movement_ids
            .iter()
            .filter_map(move |dest_id| self.movement(*dest_id))
    }
}

/// Document id -> ids of directly downstream documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessorMap(BTreeMap<DocumentId, BTreeSet<DocumentId>>);

impl SuccessorMap {
    /// Downstream documents of `id`, ascending by id
    pub fn successors(&self, id: DocumentId) -> impl Iterator<Item = DocumentId> + '_ {
        self.0.get(&id).into_iter().flatten().copied()
    }

    pub fn has_successors(&self, id: DocumentId) -> bool {
        self.0.get(&id).is_some_and(|next| !next.is_empty())
    }

    pub fn contains_edge(&self, from: DocumentId, to: DocumentId) -> bool {
        self.0.get(&from).is_some_and(|next| next.contains(&to))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.0.keys().copied()
    }
}

/// Build the successor map for the active documents of one order
pub fn build_successor_map(active: &[&FulfillmentDocument], index: &FlowIndex<'_>) -> SuccessorMap {
    let mut map = BTreeMap::new();

    for document in active {
        let next: &mut BTreeSet<DocumentId> = map.entry(document.id).or_default();
        for movement in document.active_movements() {
            for (_, owner) in index.successors_of(movement) {
                if owner.is_active() {
                    next.insert(owner.id);
                }
            }
        }
    }

    let map = SuccessorMap(map);
    tracing::debug!(
        documents = map.len(),
        edges = map.edge_count(),
        "Built fulfillment successor map"
    );
    map
}
