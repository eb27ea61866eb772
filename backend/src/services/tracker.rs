//! Delivery tracker service holding the memoized per-order fields

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use serde::Serialize;
use shared::{
    validate_document_count, validate_snapshot, DeliveryTrackerField, FulfillmentSnapshot,
    OrderId, SummaryData, TrackerLine,
};
use tokio::sync::RwLock;

use crate::config::TrackerConfig;
use crate::error::{AppError, AppResult};

/// Tracker service for computing delivery tracker fields
#[derive(Clone)]
pub struct TrackerService {
    fields: Arc<RwLock<LruCache<OrderId, DeliveryTrackerField>>>,
    max_documents: usize,
}

/// Computed tracker fields for one order
#[derive(Debug, Serialize)]
pub struct DeliveryTrackerResponse {
    pub order_id: OrderId,
    /// Serialized `{ lines, summary }` payload for the widget
    pub data: String,
    /// Short status text for list views
    pub summary: String,
    pub lines: Vec<TrackerLine>,
    pub summary_data: SummaryData,
}

impl TrackerService {
    /// Create a new TrackerService instance
    pub fn new(config: &TrackerConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_cached_orders).unwrap_or(NonZeroUsize::MIN);
        Self {
            fields: Arc::new(RwLock::new(LruCache::new(capacity))),
            max_documents: config.max_documents,
        }
    }

    /// Compute (or reuse) the tracker fields for the order in `snapshot`
    pub async fn compute(
        &self,
        snapshot: &FulfillmentSnapshot,
    ) -> AppResult<DeliveryTrackerResponse> {
        validate_document_count(snapshot, self.max_documents)?;
        validate_snapshot(snapshot)?;

        let mut fields = self.fields.write().await;
        let output = fields
            .get_or_insert_mut(snapshot.order_id, DeliveryTrackerField::new)
            .get(snapshot);

        Ok(DeliveryTrackerResponse {
            order_id: snapshot.order_id,
            data: output.to_json()?,
            summary: output.summary_text.clone(),
            lines: output.payload.lines.clone(),
            summary_data: output.payload.summary.clone(),
        })
    }

    /// Drop the memoized fields of an order
    pub async fn invalidate(&self, order_id: OrderId) -> AppResult<()> {
        let mut fields = self.fields.write().await;
        if fields.pop(&order_id).is_none() {
            return Err(AppError::NotFound(format!("Delivery tracker for order {}", order_id)));
        }
        tracing::info!(%order_id, "Invalidated delivery tracker field");
        Ok(())
    }

    /// Number of orders with a cached tracker field
    pub async fn cached_orders(&self) -> usize {
        let fields = self.fields.read().await;
        fields.iter().filter(|(_, field)| field.is_cached()).count()
    }
}
