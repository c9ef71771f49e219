//! Outcome of a routing message.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Realm;

/// What a router decided for one message.
///
/// A failed result never carries deltas, so applying it is always a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    success: bool,
    message: String,
    deltas: BTreeMap<Realm, f64>,
}

impl RoutingResult {
    #[must_use]
    pub fn succeeded(message: impl Into<String>, deltas: BTreeMap<Realm, f64>) -> Self {
        Self {
            success: true,
            message: message.into(),
            deltas,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            deltas: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn deltas(&self) -> &BTreeMap<Realm, f64> {
        &self.deltas
    }

    /// Signed delta for `realm`, `0.0` when the result does not touch it.
    #[must_use]
    pub fn delta(&self, realm: Realm) -> f64 {
        self.deltas.get(&realm).copied().unwrap_or(0.0)
    }
}
