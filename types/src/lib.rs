//! Core domain types for Tandem.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::float_cmp)] // Exact comparisons are intended for clamped boundary values

mod entry;
mod quantity;
mod realm;
mod routing;
mod state;

pub use entry::{Entry, EntryId};
pub use quantity::{Quantity, clamp_unit};
pub use realm::{Realm, RealmParseError, Reservoir};
pub use routing::RoutingResult;
pub use state::State;
