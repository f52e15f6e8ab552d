//! Domain types and rules for repair bookings.
//!
//! Zero internal dependencies: the DB and API crates both build on this.

pub mod dashboard;
pub mod error;
pub mod pagination;
pub mod stage;
pub mod types;
