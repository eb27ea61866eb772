//! Fixture builders for unit tests

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{DocumentState, FulfillmentDocument, Movement, TypeCode};

pub fn id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap()
}

pub fn movement(n: u128, demand: i64, quantity: i64) -> Movement {
    Movement {
        id: id(n),
        product: format!("Product {n}"),
        demand: Decimal::from(demand),
        quantity: Decimal::from(quantity),
        uom: "Units".to_string(),
        state: DocumentState::Assigned,
        dest_movement_ids: Vec::new(),
        orig_movement_ids: Vec::new(),
    }
}

pub fn document(
    n: u128,
    name: &str,
    state: DocumentState,
    code: TypeCode,
    movements: Vec<Movement>,
) -> FulfillmentDocument {
    FulfillmentDocument {
        id: id(n),
        name: name.to_string(),
        state,
        operation_type: Some(format!("{code} operation")),
        type_code: Some(code),
        scheduled_date: Some(at(1)),
        date_done: None,
        partner: Some("Deco Addict".to_string()),
        movements,
    }
}

/// Link movement `from_idx` of `from` to movement `to_idx` of `to`
pub fn link(
    from: &mut FulfillmentDocument,
    from_idx: usize,
    to: &mut FulfillmentDocument,
    to_idx: usize,
) {
    let from_id = from.movements[from_idx].id;
    let to_id = to.movements[to_idx].id;
    from.movements[from_idx].dest_movement_ids.push(to_id);
    to.movements[to_idx].orig_movement_ids.push(from_id);
}

/// Pick -> pack -> ship chain over one product, pick and pack done
pub fn three_step_chain() -> Vec<FulfillmentDocument> {
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
        DocumentState::Done,
        TypeCode::Internal,
        vec![movement(21, 10, 10)],
    );
    let mut ship = document(
        3,
        "WH/OUT/00001",
        DocumentState::Assigned,
        TypeCode::Outgoing,
        vec![movement(31, 10, 0)],
    );
    link(&mut pick, 0, &mut pack, 0);
    link(&mut pack, 0, &mut ship, 0);
    vec![pick, pack, ship]
}
