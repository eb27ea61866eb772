//! Delivery tracker pipeline and its memoized field
//!
//! Build graph, reduce flows, format lines, summarize. Everything is
//! recomputed from the snapshot; the only cache is [`DeliveryTrackerField`],
//! keyed on every snapshot input the output is built from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::TrackerResult;
use crate::formatter::to_tracker_line;
use crate::graph::{build_successor_map, FlowIndex};
use crate::models::{
    DocumentState, FulfillmentSnapshot, Movement, SummaryData, TrackerLine, TrackerOutput,
    TrackerPayload, TypeCode,
};
use crate::reducer::reduce_flows;
use crate::summary::summary_text;
use crate::types::{DocumentId, MovementId};

/// Compute the tracker for a snapshot, using the current time as the
/// scheduling tie-break for undated documents
pub fn compute_tracker(snapshot: &FulfillmentSnapshot) -> TrackerOutput {
    compute_tracker_at(snapshot, Utc::now())
}

/// Compute the tracker with an explicit reference time
pub fn compute_tracker_at(snapshot: &FulfillmentSnapshot, now: DateTime<Utc>) -> TrackerOutput {
    let active = snapshot.active_documents();
    let index = FlowIndex::new(&snapshot.documents);
    let successors = build_successor_map(&active, &index);

    let lines: Vec<TrackerLine> = reduce_flows(&active, &successors, &index, now)
        .into_iter()
        .map(to_tracker_line)
        .collect();
    let summary = SummaryData::from_lines(&lines);
    let summary_text = summary_text(&summary);

    tracing::debug!(
        order_id = %snapshot.order_id,
        documents = active.len(),
        lines = lines.len(),
        "Computed delivery tracker"
    );

    TrackerOutput {
        payload: TrackerPayload { lines, summary },
        summary_text,
    }
}

impl TrackerPayload {
    /// Serialized payload text blob handed to the widget
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl TrackerOutput {
    pub fn to_json(&self) -> TrackerResult<String> {
        self.payload.to_json()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MovementKey {
    id: MovementId,
    product: String,
    demand: Decimal,
    quantity: Decimal,
    uom: String,
    state: DocumentState,
    dest: Vec<MovementId>,
    orig: Vec<MovementId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DocumentKey {
    id: DocumentId,
    name: String,
    state: DocumentState,
    operation_type: Option<String>,
    type_code: Option<TypeCode>,
    scheduled_date: Option<DateTime<Utc>>,
    date_done: Option<DateTime<Utc>>,
    partner: Option<String>,
    movements: Vec<MovementKey>,
}

/// Fingerprint of every snapshot input that reaches the rendered tracker:
/// documents with their states and display fields, and movements with
/// their states, quantities and links. Snapshot order is kept since it
/// breaks ties in processing and product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyKey(Vec<DocumentKey>);

impl DependencyKey {
    pub fn from_snapshot(snapshot: &FulfillmentSnapshot) -> Self {
        let documents = snapshot
            .documents
            .iter()
            .map(|document| DocumentKey {
                id: document.id,
                name: document.name.clone(),
                state: document.state.clone(),
                operation_type: document.operation_type.clone(),
                type_code: document.type_code.clone(),
                scheduled_date: document.scheduled_date,
                date_done: document.date_done,
                partner: document.partner.clone(),
                movements: document.movements.iter().map(movement_key).collect(),
            })
            .collect();
        Self(documents)
    }
}

fn movement_key(movement: &Movement) -> MovementKey {
    MovementKey {
        id: movement.id,
        product: movement.product.clone(),
        demand: movement.demand.normalize(),
        quantity: movement.quantity.normalize(),
        uom: movement.uom.clone(),
        state: movement.state.clone(),
        dest: sorted(&movement.dest_movement_ids),
        orig: sorted(&movement.orig_movement_ids),
    }
}

fn sorted(ids: &[MovementId]) -> Vec<MovementId> {
    let mut ids = ids.to_vec();
    ids.sort();
    ids
}

/// Memoized tracker field for one order
#[derive(Debug, Default)]
pub struct DeliveryTrackerField {
    cached: Option<(DependencyKey, TrackerOutput)>,
}

impl DeliveryTrackerField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, snapshot: &FulfillmentSnapshot) -> &TrackerOutput {
        self.get_at(snapshot, Utc::now())
    }

    /// Cached output while the dependency key is unchanged, fresh otherwise
    pub fn get_at(&mut self, snapshot: &FulfillmentSnapshot, now: DateTime<Utc>) -> &TrackerOutput {
        let key = DependencyKey::from_snapshot(snapshot);
        let fresh = self
            .cached
            .as_ref()
            .is_some_and(|(cached_key, _)| *cached_key == key);
        if !fresh {
            tracing::debug!(order_id = %snapshot.order_id, "Recomputing delivery tracker field");
            self.cached = None;
        }

        let (_, output) = self
            .cached
            .get_or_insert_with(|| (key, compute_tracker_at(snapshot, now)));
        output
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
