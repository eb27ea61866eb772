//! Common types used across the tracker

use chrono::{DateTime, Utc};

/// Identifier of a fulfillment document (picking)
pub type DocumentId = uuid::Uuid;

/// Identifier of a movement line inside a fulfillment document
pub type MovementId = uuid::Uuid;

/// Order the fulfillment documents belong to
pub type OrderId = uuid::Uuid;

/// Display format for scheduled dates
pub const SCHEDULED_DATE_FORMAT: &str = "%d/%m/%Y";

/// Display format for completion timestamps
pub const DATE_DONE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Render an optional timestamp, empty when absent
pub fn format_date(value: Option<&DateTime<Utc>>, format: &str) -> String {
    value
        .map(|date| date.format(format).to_string())
        .unwrap_or_default()
}
