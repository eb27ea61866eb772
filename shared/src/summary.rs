//! Rollup counts and the short status text for list views

use crate::models::{DocumentState, SummaryData, TrackerLine};

/// Text shown when an order has no deliveries
pub const NO_DELIVERIES: &str = "Sin entregas";

impl SummaryData {
    pub fn from_lines(lines: &[TrackerLine]) -> Self {
        let total = lines.len();
        let done = count(lines, |state| *state == DocumentState::Done);
        let active = count(lines, DocumentState::is_in_process);
        let draft = count(lines, |state| *state == DocumentState::Draft);

        Self {
            total,
            done,
            active,
            draft,
            all_done: total > 0 && done == total,
        }
    }

    /// Lines that are neither done nor in process
    pub fn pending(&self) -> usize {
        self.total - self.done - self.active
    }
}

fn count(lines: &[TrackerLine], predicate: impl Fn(&DocumentState) -> bool) -> usize {
    lines.iter().filter(|line| predicate(&line.state)).count()
}

/// Human-readable delivery status, e.g. "1 completada(s) | 2 en proceso"
pub fn summary_text(summary: &SummaryData) -> String {
    if summary.total == 0 {
        return NO_DELIVERIES.to_string();
    }
    if summary.done == summary.total {
        return format!("✓ {} entrega(s) completada(s)", summary.total);
    }

    let mut parts = Vec::new();
    if summary.done > 0 {
        parts.push(format!("{} completada(s)", summary.done));
    }
    if summary.active > 0 {
        parts.push(format!("{} en proceso", summary.active));
    }
    let pending = summary.pending();
    if pending > 0 {
        parts.push(format!("{} pendiente(s)", pending));
    }
    parts.join(" | ")
}
