//! Engine for Tandem - the single owner of the current state.
//!
//! Every operation reads the current snapshot, builds a new [`State`] with
//! the pure functions from `tandem-core`, and publishes it. Writers are
//! serialized; readers only ever see whole snapshots.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use tandem_core::transform::{boost, decay};

mod sink;
pub use sink::{EntrySink, MemorySink, SinkError};

// Re-export from crates for public API
pub use tandem_config::{EngineSettings, TandemConfig};
pub use tandem_core::{
    EnergyRouter, LiftTarget, RouterSettings, RoutingMessage, TransformSpec, apply_routing_result,
};
pub use tandem_types::{Entry, EntryId, Quantity, Realm, Reservoir, RoutingResult, State};

/// A shared, immutable view of the state at one point in time.
pub type Snapshot = Arc<State>;

/// Owns the current [`State`] and exposes the operations that replace it.
///
/// `Engine` is `Send + Sync`; share it as `Arc<Engine>` when several
/// controllers need to drive it. Operations on one engine never interleave
/// their read-modify-write.
pub struct Engine {
    settings: EngineSettings,
    router: EnergyRouter,
    write_lock: Mutex<()>,
    current: watch::Sender<Snapshot>,
    sink: Option<Arc<dyn EntrySink>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("settings", &self.settings)
            .field("state", &self.state())
            .field("sink", &self.sink.as_ref().map(|_| "<entry sink>"))
            .finish()
    }
}

impl Engine {
    /// Start from the initial levels in `settings`.
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        let initial = settings.initial_state();
        Self::with_state(settings, initial)
    }

    /// Start from an existing snapshot, e.g. one loaded from storage.
    #[must_use]
    pub fn with_state(settings: EngineSettings, state: State) -> Self {
        let (current, _) = watch::channel(Arc::new(state));
        Self {
            settings,
            router: EnergyRouter::new(settings.router),
            write_lock: Mutex::new(()),
            current,
            sink: None,
        }
    }

    /// Forward every recorded entry to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EntrySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> Snapshot {
        Arc::clone(&self.current.borrow())
    }

    /// Receiver notified whenever the state is replaced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.current.subscribe()
    }

    // ========================================================================
    // Boosts
    // ========================================================================

    pub fn boost_physical(&self) {
        self.boost_field(LiftTarget::Physical);
    }

    pub fn boost_intellectual(&self) {
        self.boost_field(LiftTarget::Intellectual);
    }

    pub fn boost_bridge(&self) {
        self.boost_field(LiftTarget::Bridge);
    }

    fn boost_field(&self, target: LiftTarget) {
        let amount = self.settings.boost_amount;
        self.commit("boost", |state| {
            (Some(target.apply(boost(amount), state)), ())
        });
    }

    /// One idle tick: both reservoirs drain by the decay rate.
    pub fn decay_reservoirs(&self) {
        let rate = self.settings.decay_rate;
        self.commit("decay", |state| {
            let drained = LiftTarget::Physical.apply(decay(rate), state);
            (Some(LiftTarget::Intellectual.apply(decay(rate), &drained)), ())
        });
    }

    /// Apply a named transform through the lift for `target`.
    pub fn transform(&self, target: LiftTarget, spec: TransformSpec) {
        let transform = spec.build();
        self.commit("transform", |state| {
            (Some(target.apply(&transform, state)), ())
        });
    }

    // ========================================================================
    // Routing
    // ========================================================================

    /// Push `amount` from one reservoir to the other at push efficiency.
    pub fn blow(&self, from: Reservoir, to: Reservoir, amount: f64) -> RoutingResult {
        self.route(RoutingMessage::Blow {
            from: from.realm(),
            to: to.realm(),
            amount,
        })
    }

    /// Pull `amount` from one reservoir to the other at pull efficiency.
    pub fn suck(&self, from: Reservoir, to: Reservoir, amount: f64) -> RoutingResult {
        self.route(RoutingMessage::Suck {
            from: from.realm(),
            to: to.realm(),
            amount,
        })
    }

    /// One balancing step between the two reservoirs.
    pub fn auto_balance(&self) -> RoutingResult {
        self.route(RoutingMessage::Balance {
            first: Realm::Physical,
            second: Realm::Intellectual,
        })
    }

    fn route(&self, message: RoutingMessage) -> RoutingResult {
        self.commit(message.kind(), |state| {
            let result = self.router.route(&message, state);
            let next = result
                .is_success()
                .then(|| apply_routing_result(&result, state));
            (next, result)
        })
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// Append a new entry and boost the field its category names.
    ///
    /// The entry is visible to the next read before the sink sees it; a sink
    /// failure is logged and the entry stays.
    pub fn record_entry(&self, content: impl Into<String>, category: Realm) -> Entry {
        let amount = match category {
            Realm::Bridge => self.settings.bridge_entry_boost,
            Realm::Physical | Realm::Intellectual => self.settings.reservoir_entry_boost,
        };

        // Stamped under the write lock: `created_at` is non-decreasing along the log.
        let entry = self.commit("record_entry", |state| {
            let entry = Entry::new(content, category);
            let appended = state.clone().with_entry(entry.clone());
            let boosted = LiftTarget::from(category).apply(boost(amount), &appended);
            (Some(boosted), entry)
        });

        if let Some(sink) = &self.sink
            && let Err(err) = sink.persist(&entry)
        {
            tracing::warn!(
                entry = %entry.id(),
                error = %err,
                "Failed to persist entry; keeping it in memory"
            );
        }
        entry
    }

    /// Replace the whole state, e.g. after loading a stored snapshot.
    pub fn restore(&self, state: State) {
        self.commit("restore", |_| (Some(state), ()));
    }

    /// Serialize the read-modify-write of one operation.
    ///
    /// `f` sees the current snapshot and returns the replacement (or `None`
    /// to keep it) plus a value for the caller.
    fn commit<R>(&self, op: &'static str, f: impl FnOnce(&State) -> (Option<State>, R)) -> R {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self.state();
        let (next, outcome) = f(&current);
        match next {
            Some(next) => {
                tracing::info!(
                    op,
                    physical = %next.physical(),
                    intellectual = %next.intellectual(),
                    bridge = %next.bridge(),
                    harmony = %next.harmony(),
                    entries = next.entries().len(),
                    "State replaced"
                );
                self.current.send_replace(Arc::new(next));
            }
            None => tracing::debug!(op, "State kept"),
        }
        outcome
    }
}
