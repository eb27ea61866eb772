//! Domain models for the delivery tracker

mod document;
mod tracker;

pub use document::*;
pub use tracker::*;
