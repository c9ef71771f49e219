//! Lift scalar transforms to whole-state transforms.
//!
//! A lifted transform rewrites its target field(s) and carries every other
//! field, the entry log included, over unchanged.

use serde::{Deserialize, Serialize};
use tandem_types::{Quantity, Realm, State};

use super::apply_transform;

fn lift_to<F>(realm: Realm, f: F) -> impl Fn(&State) -> State
where
    F: Fn(f64) -> f64,
{
    move |state| {
        let next = apply_transform(&f, state.level(realm).get());
        state.clone().with_level(realm, Quantity::new(next))
    }
}

pub fn lift_to_physical<F>(f: F) -> impl Fn(&State) -> State
where
    F: Fn(f64) -> f64,
{
    lift_to(Realm::Physical, f)
}

pub fn lift_to_intellectual<F>(f: F) -> impl Fn(&State) -> State
where
    F: Fn(f64) -> f64,
{
    lift_to(Realm::Intellectual, f)
}

pub fn lift_to_bridge<F>(f: F) -> impl Fn(&State) -> State
where
    F: Fn(f64) -> f64,
{
    lift_to(Realm::Bridge, f)
}

/// Apply `f` to both reservoirs and the bridge, each independently.
pub fn lift_to_all<F>(f: F) -> impl Fn(&State) -> State
where
    F: Fn(f64) -> f64,
{
    move |state| {
        Realm::ALL.iter().fold(state.clone(), |acc, &realm| {
            let next = apply_transform(&f, state.level(realm).get());
            acc.with_level(realm, Quantity::new(next))
        })
    }
}

/// Which lift a runtime-selected transform goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiftTarget {
    Physical,
    Intellectual,
    Bridge,
    All,
}

impl LiftTarget {
    /// Run `f` against `state` through the matching lift.
    #[must_use]
    pub fn apply<F>(self, f: F, state: &State) -> State
    where
        F: Fn(f64) -> f64,
    {
        match self {
            LiftTarget::Physical => lift_to_physical(f)(state),
            LiftTarget::Intellectual => lift_to_intellectual(f)(state),
            LiftTarget::Bridge => lift_to_bridge(f)(state),
            LiftTarget::All => lift_to_all(f)(state),
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(LiftTarget::All),
            other => other.parse::<Realm>().ok().map(LiftTarget::from),
        }
    }
}

impl From<Realm> for LiftTarget {
    fn from(value: Realm) -> Self {
        match value {
            Realm::Physical => LiftTarget::Physical,
            Realm::Intellectual => LiftTarget::Intellectual,
            Realm::Bridge => LiftTarget::Bridge,
        }
    }
}
