//! Fulfillment document (picking) and movement models
//!
//! These mirror the records owned by the warehouse system. The tracker only
//! reads them; states, quantities and links are whatever the host supplied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, MovementId, OrderId};

/// Lifecycle state shared by documents and movements
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentState {
    Draft,
    Waiting,
    Confirmed,
    Assigned,
    Done,
    Cancel,
    /// State code the tracker does not know about, kept verbatim
    Other(String),
}

impl DocumentState {
    pub fn as_str(&self) -> &str {
        match self {
            DocumentState::Draft => "draft",
            DocumentState::Waiting => "waiting",
            DocumentState::Confirmed => "confirmed",
            DocumentState::Assigned => "assigned",
            DocumentState::Done => "done",
            DocumentState::Cancel => "cancel",
            DocumentState::Other(code) => code,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DocumentState::Cancel)
    }

    /// Assigned, confirmed and waiting documents count as in process
    pub fn is_in_process(&self) -> bool {
        matches!(
            self,
            DocumentState::Assigned | DocumentState::Confirmed | DocumentState::Waiting
        )
    }
}

impl From<String> for DocumentState {
    fn from(code: String) -> Self {
        match code.as_str() {
            "draft" => DocumentState::Draft,
            "waiting" => DocumentState::Waiting,
            "confirmed" => DocumentState::Confirmed,
            "assigned" => DocumentState::Assigned,
            "done" => DocumentState::Done,
            "cancel" => DocumentState::Cancel,
            _ => DocumentState::Other(code),
        }
    }
}

impl From<&str> for DocumentState {
    fn from(code: &str) -> Self {
        DocumentState::from(code.to_string())
    }
}

impl From<DocumentState> for String {
    fn from(state: DocumentState) -> Self {
        match state {
            DocumentState::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation type code of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeCode {
    Incoming,
    Internal,
    Outgoing,
    Other(String),
}

impl TypeCode {
    pub fn as_str(&self) -> &str {
        match self {
            TypeCode::Incoming => "incoming",
            TypeCode::Internal => "internal",
            TypeCode::Outgoing => "outgoing",
            TypeCode::Other(code) => code,
        }
    }
}

impl From<String> for TypeCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "incoming" => TypeCode::Incoming,
            "internal" => TypeCode::Internal,
            "outgoing" => TypeCode::Outgoing,
            _ => TypeCode::Other(code),
        }
    }
}

impl From<&str> for TypeCode {
    fn from(code: &str) -> Self {
        TypeCode::from(code.to_string())
    }
}

impl From<TypeCode> for String {
    fn from(code: TypeCode) -> Self {
        match code {
            TypeCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fulfillment document (transfer) linked to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentDocument {
    pub id: DocumentId,
    pub name: String,
    pub state: DocumentState,
    /// Name of the operation type, shown as the stage label
    #[serde(default)]
    pub operation_type: Option<String>,
    #[serde(default)]
    pub type_code: Option<TypeCode>,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_done: Option<DateTime<Utc>>,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub movements: Vec<Movement>,
}

impl FulfillmentDocument {
    pub fn is_active(&self) -> bool {
        !self.state.is_cancelled()
    }

    /// Movements that are not cancelled
    pub fn active_movements(&self) -> impl Iterator<Item = &Movement> {
        self.movements.iter().filter(|movement| movement.is_active())
    }

    /// Total requested quantity over active movements
    pub fn total_demand(&self) -> Decimal {
        saturating_sum(self.active_movements().map(|movement| movement.demand))
    }

    /// Total fulfilled quantity over active movements
    pub fn total_done(&self) -> Decimal {
        saturating_sum(self.active_movements().map(|movement| movement.quantity))
    }
}

/// Sum that clamps to the representable range instead of panicking
fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).unwrap_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    })
}

/// One product line of a fulfillment document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product: String,
    /// Requested quantity
    pub demand: Decimal,
    /// Fulfilled quantity
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub uom: String,
    pub state: DocumentState,
    /// Successor movements in downstream documents
    #[serde(default)]
    pub dest_movement_ids: Vec<MovementId>,
    /// Predecessor movements in upstream documents
    #[serde(default)]
    pub orig_movement_ids: Vec<MovementId>,
}

impl Movement {
    pub fn is_active(&self) -> bool {
        !self.state.is_cancelled()
    }
}

/// Every fulfillment document linked to one order, cancelled ones included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentSnapshot {
    pub order_id: OrderId,
    #[serde(default)]
    pub order_name: Option<String>,
    #[serde(default)]
    pub documents: Vec<FulfillmentDocument>,
}

impl FulfillmentSnapshot {
    /// Documents that are not cancelled, in snapshot order
    pub fn active_documents(&self) -> Vec<&FulfillmentDocument> {
        self.documents
            .iter()
            .filter(|document| document.is_active())
            .collect()
    }
}
