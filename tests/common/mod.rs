//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use tandem_engine::{Engine, EngineSettings, Quantity, Realm, Reservoir, State};

pub const EPS: f64 = 1e-9;

/// Engine with default settings starting at the given levels.
pub fn engine_at(physical: f64, intellectual: f64, bridge: f64) -> Engine {
    Engine::with_state(
        EngineSettings::default(),
        State::new(physical, intellectual, bridge),
    )
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_level(state: &State, realm: Realm, expected: f64) {
    assert_close(state.level(realm).get(), expected);
}

pub fn assert_in_bounds(state: &State) {
    for realm in Realm::ALL {
        let level = state.level(realm).get();
        assert!(
            (0.0..=1.0).contains(&level),
            "{realm} out of bounds: {level}"
        );
    }
}

/// One operation a controller can issue against the engine.
#[derive(Debug, Clone)]
pub enum Op {
    Boost(Realm),
    Blow(Reservoir, f64),
    Suck(Reservoir, f64),
    Balance,
    Decay,
    Record(Realm),
}

impl Op {
    pub fn apply(&self, engine: &Engine) {
        match self {
            Op::Boost(Realm::Physical) => engine.boost_physical(),
            Op::Boost(Realm::Intellectual) => engine.boost_intellectual(),
            Op::Boost(Realm::Bridge) => engine.boost_bridge(),
            Op::Blow(from, amount) => {
                engine.blow(*from, from.other(), *amount);
            }
            Op::Suck(from, amount) => {
                engine.suck(*from, from.other(), *amount);
            }
            Op::Balance => {
                engine.auto_balance();
            }
            Op::Decay => engine.decay_reservoirs(),
            Op::Record(category) => {
                engine.record_entry("generated", *category);
            }
        }
    }
}

pub fn arb_realm() -> impl Strategy<Value = Realm> {
    prop_oneof![
        Just(Realm::Physical),
        Just(Realm::Intellectual),
        Just(Realm::Bridge),
    ]
}

pub fn arb_reservoir() -> impl Strategy<Value = Reservoir> {
    prop_oneof![Just(Reservoir::Physical), Just(Reservoir::Intellectual)]
}

/// Amounts include zero, negatives and overdrafts so refusals are covered.
pub fn arb_amount() -> impl Strategy<Value = f64> {
    -0.5f64..1.5
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_realm().prop_map(Op::Boost),
        (arb_reservoir(), arb_amount()).prop_map(|(from, amount)| Op::Blow(from, amount)),
        (arb_reservoir(), arb_amount()).prop_map(|(from, amount)| Op::Suck(from, amount)),
        Just(Op::Balance),
        Just(Op::Decay),
        arb_realm().prop_map(Op::Record),
    ]
}

pub fn arb_level() -> impl Strategy<Value = f64> {
    0.0f64..=1.0
}

pub fn arb_state() -> impl Strategy<Value = State> {
    (arb_level(), arb_level(), arb_level()).prop_map(|(p, i, b)| State::new(p, i, b))
}

pub fn quantity(value: f64) -> Quantity {
    Quantity::new(value)
}
