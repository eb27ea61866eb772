//! WebAssembly module for the delivery tracker
//!
//! Provides client-side computation for:
//! - The tracker payload from a fulfillment snapshot
//! - The short delivery summary text
//! - Widget display helpers (progress bar fill, summary badge)

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::summary::NO_DELIVERIES;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("delivery tracker module loaded"));
}

fn parse_snapshot(snapshot_json: &str) -> Result<FulfillmentSnapshot, String> {
    serde_json::from_str(snapshot_json).map_err(|e| format!("Invalid snapshot JSON: {}", e))
}

fn tracker_json(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    shared::compute_tracker(&snapshot)
        .to_json()
        .map_err(|e| e.to_string())
}

fn summary_for(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    Ok(shared::compute_tracker(&snapshot).summary_text)
}

/// Compute the tracker payload (`{ lines, summary }`) as JSON text
#[wasm_bindgen]
pub fn compute_delivery_tracker(snapshot_json: &str) -> Result<String, JsValue> {
    tracker_json(snapshot_json).map_err(|e| JsValue::from_str(&e))
}

/// Compute the short delivery status text
#[wasm_bindgen]
pub fn delivery_summary_text(snapshot_json: &str) -> Result<String, JsValue> {
    summary_for(snapshot_json).map_err(|e| JsValue::from_str(&e))
}

/// CSS class for a line's progress bar fill
#[wasm_bindgen]
pub fn progress_fill_class(state: &str) -> String {
    match DocumentState::from(state) {
        DocumentState::Done => "fill-success",
        DocumentState::Assigned => "fill-primary",
        _ => "fill-warning",
    }
    .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Badge {
    Empty,
    Done,
    Progress,
}

fn badge(summary: &str) -> Badge {
    if summary.is_empty() || summary == NO_DELIVERIES {
        Badge::Empty
    } else if summary.starts_with('✓') {
        Badge::Done
    } else {
        Badge::Progress
    }
}

/// CSS class for the summary badge in the order header
#[wasm_bindgen]
pub fn summary_badge_class(summary: &str) -> String {
    match badge(summary) {
        Badge::Empty => "summary-empty",
        Badge::Done => "summary-done",
        Badge::Progress => "summary-progress",
    }
    .to_string()
}

/// Icon classes for the summary badge
#[wasm_bindgen]
pub fn summary_badge_icon(summary: &str) -> String {
    match badge(summary) {
        Badge::Empty => "fa-clock-o",
        Badge::Done => "fa-check-circle",
        Badge::Progress => "fa-spinner fa-pulse",
    }
    .to_string()
}
