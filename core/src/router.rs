//! Energy router.
//!
//! The router is stateless: it reads a [`State`] and a [`RoutingMessage`] and
//! returns a [`RoutingResult`] describing what should change. It never writes
//! to the state it was given; [`apply_routing_result`] builds the next state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tandem_types::{Quantity, Realm, RoutingResult, State};
use thiserror::Error;

use crate::transform::{PULL_EFFICIENCY, PUSH_EFFICIENCY, clamp};

/// Tunables for the router. `Default` yields the canonical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Fraction of a push transfer that reaches its destination.
    pub push_efficiency: f64,
    /// Fraction of a pull transfer that reaches its destination.
    pub pull_efficiency: f64,
    /// Fraction of the difference moved by one balancing step.
    pub balancing_rate: f64,
    /// Differences at or below this are already balanced.
    pub equilibrium_threshold: f64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            push_efficiency: PUSH_EFFICIENCY,
            pull_efficiency: PULL_EFFICIENCY,
            balancing_rate: 0.05,
            equilibrium_threshold: 0.01,
        }
    }
}

/// A request to move energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingMessage {
    /// Push transfer: debits `amount`, credits `amount * push_efficiency`.
    Blow { from: Realm, to: Realm, amount: f64 },
    /// Pull transfer: debits `amount`, credits `amount * pull_efficiency`.
    Suck { from: Realm, to: Realm, amount: f64 },
    /// Move a bounded fraction of the difference from the higher to the lower.
    Balance { first: Realm, second: Realm },
}

impl RoutingMessage {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            RoutingMessage::Blow { .. } => "blow",
            RoutingMessage::Suck { .. } => "suck",
            RoutingMessage::Balance { .. } => "balance",
        }
    }
}

/// Why a transfer was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("insufficient energy in {0}")]
    Insufficient(Realm),
    #[error("cannot route {0} into itself")]
    SameRealm(Realm),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyRouter {
    settings: RouterSettings,
}

impl EnergyRouter {
    #[must_use]
    pub const fn new(settings: RouterSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Decide the effect of `message` against `state`.
    #[must_use]
    pub fn route(&self, message: &RoutingMessage, state: &State) -> RoutingResult {
        let result = match *message {
            RoutingMessage::Blow { from, to, amount } => {
                Self::transfer(state, from, to, amount, self.settings.push_efficiency)
            }
            RoutingMessage::Suck { from, to, amount } => {
                Self::transfer(state, from, to, amount, self.settings.pull_efficiency)
            }
            RoutingMessage::Balance { first, second } => self.balance(state, first, second),
        };
        tracing::debug!(
            kind = message.kind(),
            success = result.is_success(),
            message = result.message(),
            "routed"
        );
        result
    }

    fn transfer(
        state: &State,
        from: Realm,
        to: Realm,
        amount: f64,
        efficiency: f64,
    ) -> RoutingResult {
        match Self::check_transfer(state, from, to, amount) {
            Ok(()) => {
                let credited = amount * efficiency;
                let deltas = BTreeMap::from([(from, -amount), (to, credited)]);
                RoutingResult::succeeded(
                    format!("moved {amount:.3} from {from} to {to}, {credited:.3} arrived"),
                    deltas,
                )
            }
            Err(err) => RoutingResult::failed(err.to_string()),
        }
    }

    fn check_transfer(
        state: &State,
        from: Realm,
        to: Realm,
        amount: f64,
    ) -> Result<(), RoutingError> {
        // `!(amount > 0.0)` also rejects NaN.
        if !(amount > 0.0) {
            return Err(RoutingError::NonPositiveAmount);
        }
        if from == to {
            return Err(RoutingError::SameRealm(from));
        }
        if state.level(from).get() < amount {
            return Err(RoutingError::Insufficient(from));
        }
        Ok(())
    }

    fn balance(&self, state: &State, first: Realm, second: Realm) -> RoutingResult {
        let a = state.level(first);
        let b = state.level(second);
        let diff = a.distance(b);
        if diff <= self.settings.equilibrium_threshold {
            return RoutingResult::succeeded(
                format!("{first} and {second} are already balanced"),
                BTreeMap::new(),
            );
        }

        // Never move more than half the gap, so the levels cannot cross.
        let amount = (diff * self.settings.balancing_rate).min(diff / 2.0);
        let (high, low) = if a >= b { (first, second) } else { (second, first) };
        RoutingResult::succeeded(
            format!("balanced {amount:.3} from {high} to {low}"),
            BTreeMap::from([(high, -amount), (low, amount)]),
        )
    }
}

/// Build the state that results from `result`.
///
/// A failed result yields an unchanged copy of `state`. Each touched field is
/// clamped after its delta is added; untouched fields and the entry log are
/// carried over verbatim.
#[must_use]
pub fn apply_routing_result(result: &RoutingResult, state: &State) -> State {
    if !result.is_success() {
        return state.clone();
    }
    result
        .deltas()
        .iter()
        .filter(|(_, delta)| **delta != 0.0)
        .fold(state.clone(), |next, (&realm, &delta)| {
            let level = clamp(state.level(realm).get() + delta);
            next.with_level(realm, Quantity::new(level))
        })
}
