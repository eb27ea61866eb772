//! Display formatting for chosen documents

use rust_decimal::Decimal;

use crate::models::{
    DocumentState, FulfillmentDocument, Movement, ProductLine, StateDisplay, TrackerLine, TypeCode,
};
use crate::types::{format_date, DATE_DONE_FORMAT, SCHEDULED_DATE_FORMAT};

/// Stage label used when a document has no operation type name
pub const DEFAULT_STAGE_LABEL: &str = "Transfer";

/// Label and badge color for a document state
pub fn state_display(state: &DocumentState) -> StateDisplay {
    let (label, color) = match state {
        DocumentState::Draft => ("Borrador", "secondary"),
        DocumentState::Waiting => ("En espera", "warning"),
        DocumentState::Confirmed => ("Confirmado", "info"),
        DocumentState::Assigned => ("Listo", "primary"),
        DocumentState::Done => ("Realizado", "success"),
        DocumentState::Cancel | DocumentState::Other(_) => (state.as_str(), "secondary"),
    };
    StateDisplay {
        label: label.to_string(),
        color,
    }
}

/// Font Awesome icon for an operation type
pub fn type_icon(code: &TypeCode) -> &'static str {
    match code {
        TypeCode::Internal => "fa-exchange",
        TypeCode::Outgoing => "fa-truck",
        TypeCode::Incoming => "fa-arrow-down",
        TypeCode::Other(_) => "fa-box",
    }
}

/// Fulfilled share of `demand` as a percentage with one decimal.
///
/// Done documents always report 100. A ratio too large to represent
/// saturates at [`Decimal::MAX`].
pub fn progress(state: &DocumentState, demand: Decimal, done: Decimal) -> Decimal {
    if *state == DocumentState::Done {
        return Decimal::ONE_HUNDRED;
    }
    if demand <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    done.checked_div(demand)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp(1))
        .unwrap_or(Decimal::MAX)
}

fn product_line(movement: &Movement) -> ProductLine {
    ProductLine {
        product: movement.product.clone(),
        demand: movement.demand,
        done: movement.quantity,
        uom: movement.uom.clone(),
        progress: progress(&movement.state, movement.demand, movement.quantity),
    }
}

/// Convert a chosen document into its tracker line
pub fn to_tracker_line(document: &FulfillmentDocument) -> TrackerLine {
    let total_demand = document.total_demand();
    let total_done = document.total_done();
    let type_code = document.type_code.clone().unwrap_or(TypeCode::Internal);
    let display = state_display(&document.state);

    TrackerLine {
        id: document.id,
        name: document.name.clone(),
        stage: document
            .operation_type
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_STAGE_LABEL.to_string()),
        icon: type_icon(&type_code).to_string(),
        type_code,
        state: document.state.clone(),
        state_label: display.label,
        state_color: display.color.to_string(),
        scheduled_date: format_date(document.scheduled_date.as_ref(), SCHEDULED_DATE_FORMAT),
        date_done: format_date(document.date_done.as_ref(), DATE_DONE_FORMAT),
        progress: progress(&document.state, total_demand, total_done),
        total_demand,
        total_done,
        products: document.active_movements().map(product_line).collect(),
        partner: document.partner.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_state_display_table() {
        let cases = [
            ("draft", "Borrador", "secondary"),
            ("waiting", "En espera", "warning"),
            ("confirmed", "Confirmado", "info"),
            ("assigned", "Listo", "primary"),
            ("done", "Realizado", "success"),
            ("on_hold", "on_hold", "secondary"),
        ];
        for (code, label, color) in cases {
            let display = state_display(&DocumentState::from(code));
            assert_eq!(display.label, label);
            assert_eq!(display.color, color);
        }
    }

    #[test]
    fn test_type_icon_table() {
        assert_eq!(type_icon(&TypeCode::Internal), "fa-exchange");
        assert_eq!(type_icon(&TypeCode::Outgoing), "fa-truck");
        assert_eq!(type_icon(&TypeCode::Incoming), "fa-arrow-down");
        assert_eq!(type_icon(&TypeCode::from("dropship")), "fa-box");
    }

    #[test]
    fn test_progress_rounds_to_one_decimal() {
        assert_eq!(progress(&DocumentState::Assigned, dec("3"), dec("1")), dec("33.3"));
        assert_eq!(progress(&DocumentState::Assigned, dec("3"), dec("2")), dec("66.7"));
        assert_eq!(progress(&DocumentState::Assigned, dec("0"), dec("5")), Decimal::ZERO);
    }

    #[test]
    fn test_progress_saturates_on_overflow() {
        let tiny = dec("0.000000001");
        let huge = dec("1000000000000000000000");

        assert_eq!(progress(&DocumentState::Assigned, tiny, huge), Decimal::MAX);
        assert_eq!(progress(&DocumentState::Assigned, huge, huge), dec("100"));
        assert_eq!(progress(&DocumentState::Done, tiny, huge), dec("100"));
    }

    #[test]
    fn test_done_progress_is_forced_to_100() {
        assert_eq!(progress(&DocumentState::Done, dec("0"), dec("0")), dec("100"));
        assert_eq!(progress(&DocumentState::Done, dec("10"), dec("2")), dec("100"));
    }

    #[test]
    fn test_single_leaf_document_line() {
        let document = document(
            7,
            "WH/OUT/00007",
            DocumentState::Assigned,
            TypeCode::Outgoing,
            vec![movement(71, 10, 4), movement(72, 5, 5)],
        );
        let line = to_tracker_line(&document);

        assert_eq!(line.total_demand, dec("15"));
        assert_eq!(line.total_done, dec("9"));
        assert_eq!(line.progress, dec("60.0"));
        assert_eq!(line.products.len(), 2);
        assert_eq!(line.products[0].progress, dec("40.0"));
        assert_eq!(line.products[1].progress, dec("100.0"));
        assert_eq!(line.icon, "fa-truck");
        assert_eq!(line.state_label, "Listo");
        assert_eq!(line.scheduled_date, "01/05/2024");
        assert_eq!(line.date_done, "");
        assert_eq!(line.partner, "Deco Addict");
    }

    #[test]
    fn test_line_defaults_for_missing_metadata() {
        let mut document = document(
            8,
            "WH/INT/00008",
            DocumentState::Draft,
            TypeCode::Incoming,
            vec![],
        );
        document.operation_type = None;
        document.type_code = None;
        document.partner = None;
        document.scheduled_date = None;
        let line = to_tracker_line(&document);

        assert_eq!(line.stage, "Transfer");
        assert_eq!(line.type_code, TypeCode::Internal);
        assert_eq!(line.icon, "fa-exchange");
        assert_eq!(line.partner, "");
        assert_eq!(line.scheduled_date, "");
        assert_eq!(line.progress, Decimal::ZERO);
    }

    #[test]
    fn test_cancelled_movements_are_left_out() {
        let mut document = document(
            9,
            "WH/OUT/00009",
            DocumentState::Done,
            TypeCode::Outgoing,
            vec![movement(91, 4, 4), movement(92, 6, 0)],
        );
        document.movements[1].state = DocumentState::Cancel;
        let line = to_tracker_line(&document);

        assert_eq!(line.products.len(), 1);
        assert_eq!(line.total_demand, dec("4"));
        assert_eq!(line.progress, dec("100"));
    }
}
