//! Core domain logic for Tandem.
//!
//! This crate contains the pure parts of the system: the bounded transform
//! library and the energy router. Nothing here owns state or performs IO;
//! every function takes a snapshot and returns a new value.

#![allow(clippy::float_cmp)] // Exact comparisons are intended for clamped boundary values

pub mod router;
pub mod transform;

pub use router::{
    EnergyRouter, RouterSettings, RoutingError, RoutingMessage, apply_routing_result,
};
pub use transform::TransformSpec;
pub use transform::contract::{ContractViolation, TransformResult};
pub use transform::lift::LiftTarget;
