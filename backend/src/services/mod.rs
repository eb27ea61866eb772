//! Business logic services for the delivery tracker server

pub mod tracker;

pub use tracker::TrackerService;
