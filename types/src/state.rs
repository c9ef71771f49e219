//! Immutable reservoir snapshot.

use serde::{Deserialize, Serialize};

use crate::{Entry, Quantity, Realm};

/// One snapshot of the two reservoirs, the bridge and the entry log.
///
/// # Invariants
///
/// - Every level is a [`Quantity`], so always inside `[0, 1]`
/// - `entries` is append-only; nothing but [`State::with_entry`] adds to it
/// - A `State` is never mutated in place: every `with_*` method consumes the
///   value and returns a new one
///
/// # Serde
///
/// Only stored fields are serialized. `harmony` and `total_energy` are
/// recomputed from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    entries: Vec<Entry>,
    physical: Quantity,
    intellectual: Quantity,
    bridge: Quantity,
}

impl Default for State {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            physical: Quantity::HALF,
            intellectual: Quantity::HALF,
            bridge: Quantity::HALF,
        }
    }
}

impl State {
    /// Build a state with no entries. Raw values are clamped.
    #[must_use]
    pub fn new(physical: f64, intellectual: f64, bridge: f64) -> Self {
        Self {
            entries: Vec::new(),
            physical: Quantity::new(physical),
            intellectual: Quantity::new(intellectual),
            bridge: Quantity::new(bridge),
        }
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn physical(&self) -> Quantity {
        self.physical
    }

    #[must_use]
    pub fn intellectual(&self) -> Quantity {
        self.intellectual
    }

    #[must_use]
    pub fn bridge(&self) -> Quantity {
        self.bridge
    }

    #[must_use]
    pub fn level(&self, realm: Realm) -> Quantity {
        match realm {
            Realm::Physical => self.physical,
            Realm::Intellectual => self.intellectual,
            Realm::Bridge => self.bridge,
        }
    }

    /// Replace one field, carrying every other field over unchanged.
    #[must_use]
    pub fn with_level(mut self, realm: Realm, value: Quantity) -> Self {
        match realm {
            Realm::Physical => self.physical = value,
            Realm::Intellectual => self.intellectual = value,
            Realm::Bridge => self.bridge = value,
        }
        self
    }

    /// Append an entry at the end of the log.
    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// `(1 - |physical - intellectual|) * bridge`.
    ///
    /// Symmetric in the two reservoirs, linear in the bridge, `1` only at
    /// perfect balance with a full bridge and `0` at maximal imbalance.
    #[must_use]
    pub fn harmony(&self) -> Quantity {
        let balance = 1.0 - self.physical.distance(self.intellectual);
        Quantity::new(balance * self.bridge.get())
    }

    /// Sum of both reservoirs. The bridge is a coupling, not stored energy.
    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.physical.get() + self.intellectual.get()
    }
}
