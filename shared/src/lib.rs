//! Delivery tracker projection over an order's fulfillment documents
//!
//! Collapses multi-step fulfillment flows (pick, pack, ship) down to the
//! most advanced document per flow and summarizes delivery progress. This
//! crate is shared by the HTTP backend and the WASM bindings.

pub mod error;
pub mod formatter;
pub mod graph;
pub mod models;
pub mod reducer;
pub mod summary;
pub mod tracker;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::*;
pub use models::*;
pub use tracker::*;
pub use types::*;
pub use validation::*;
