//! Output models consumed by the delivery tracker widget

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DocumentState, TypeCode};
use crate::types::DocumentId;

/// One display line per chosen document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerLine {
    pub id: DocumentId,
    pub name: String,
    /// Operation type name, e.g. "Pick" or "Delivery Orders"
    pub stage: String,
    pub type_code: TypeCode,
    pub state: DocumentState,
    pub state_label: String,
    pub state_color: String,
    pub scheduled_date: String,
    pub date_done: String,
    /// Percentage 0-100 with one decimal
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_demand: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_done: Decimal,
    pub icon: String,
    pub products: Vec<ProductLine>,
    pub partner: String,
}

/// Per-movement breakdown inside a tracker line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    pub product: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub demand: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub done: Decimal,
    pub uom: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub progress: Decimal,
}

/// Rollup counts over the emitted lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryData {
    pub total: usize,
    pub done: usize,
    /// Assigned, confirmed and waiting lines
    pub active: usize,
    pub draft: usize,
    pub all_done: bool,
}

/// Payload handed to the widget as a single text blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerPayload {
    pub lines: Vec<TrackerLine>,
    pub summary: SummaryData,
}

/// Both computed values of the tracker field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerOutput {
    pub payload: TrackerPayload,
    /// Short text for list and kanban views
    pub summary_text: String,
}

/// Label and badge color for a document state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDisplay {
    pub label: String,
    pub color: &'static str,
}
