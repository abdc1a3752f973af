// Declare modules within this crate
pub mod conflict;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod hours;
pub mod interval;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod routes;
pub mod service;
#[cfg(test)]
mod service_test;

pub use conflict::{overlaps, ConflictDetector};
pub use error::{BookingError, Field};
pub use hours::BusinessHours;
pub use interval::{normalize, CivilInterval};
pub use service::BookingService;
