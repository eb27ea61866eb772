//! HTTP handlers for the delivery tracker server

mod health;
mod tracker;

pub use health::*;
pub use tracker::*;
