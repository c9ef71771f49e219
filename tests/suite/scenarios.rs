//! End-to-end scenarios driven through the public engine API.

use std::sync::Arc;
use std::thread;

use tandem_engine::{
    Engine, EngineSettings, LiftTarget, MemorySink, Quantity, Realm, Reservoir, State,
    TransformSpec,
};

use crate::common::{assert_close, assert_in_bounds, assert_level, engine_at};

#[test]
fn blow_from_physical_to_intellectual() {
    let engine = engine_at(0.6, 0.4, 0.5);
    let result = engine.blow(Reservoir::Physical, Reservoir::Intellectual, 0.2);

    assert!(result.is_success());
    let state = engine.state();
    assert_level(&state, Realm::Physical, 0.4);
    assert_level(&state, Realm::Intellectual, 0.56);
    assert_level(&state, Realm::Bridge, 0.5);
}

#[test]
fn overdrawn_blow_is_refused() {
    let engine = engine_at(0.6, 0.4, 0.5);
    let before = engine.state();
    let result = engine.blow(Reservoir::Physical, Reservoir::Intellectual, 0.8);

    assert!(!result.is_success());
    assert!(result.message().to_lowercase().contains("insufficient"));
    assert_eq!(*engine.state(), *before);
}

#[test]
fn harmony_extremes() {
    assert_eq!(State::new(0.5, 0.5, 1.0).harmony(), Quantity::ONE);
    assert_eq!(State::new(1.0, 0.0, 1.0).harmony(), Quantity::ZERO);
    assert_eq!(State::new(0.3, 0.3, 0.0).harmony(), Quantity::ZERO);
}

#[test]
fn repeated_balancing_converges_from_a_moderate_gap() {
    let engine = engine_at(0.62, 0.38, 0.5);
    for _ in 0..10 {
        assert!(engine.auto_balance().is_success());
    }
    let state = engine.state();
    assert!(state.physical().distance(state.intellectual()) < 0.1);
    assert_close(state.total_energy(), 1.0);
}

#[test]
fn balancing_a_wide_gap_keeps_narrowing() {
    let engine = engine_at(1.0, 0.0, 0.5);
    let mut gap = 1.0;
    for _ in 0..60 {
        engine.auto_balance();
        let state = engine.state();
        let next = state.physical().distance(state.intellectual());
        assert!(next <= gap);
        gap = next;
    }
    assert!(gap <= 0.01 + 1e-12);
}

#[test]
fn a_day_of_activity() {
    let sink = Arc::new(MemorySink::new());
    let engine = Engine::default().with_sink(sink.clone());
    let mut updates = engine.subscribe();

    engine.record_entry("interval run", Realm::Physical);
    engine.record_entry("paper on sleep", Realm::Intellectual);
    engine.record_entry("explained training plan to a friend", Realm::Bridge);
    engine.boost_physical();
    let pushed = engine.blow(Reservoir::Physical, Reservoir::Intellectual, 0.1);
    let pulled = engine.suck(Reservoir::Intellectual, Reservoir::Physical, 0.05);
    engine.auto_balance();
    engine.decay_reservoirs();

    assert!(pushed.is_success());
    assert!(pulled.is_success());
    assert!(updates.has_changed().unwrap());

    let state = updates.borrow_and_update().clone();
    assert_eq!(*state, *engine.state());
    assert_in_bounds(&state);
    assert_eq!(state.entries().len(), 3);
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.entries(), state.entries());
    assert_level(&state, Realm::Bridge, 0.6);
    assert!(state.harmony() > Quantity::new(0.5));
}

#[test]
fn transforms_by_name_reach_the_right_fields() {
    let engine = engine_at(0.2, 0.4, 0.6);
    let spec = TransformSpec::parse("scale=2").unwrap();
    engine.transform(LiftTarget::Intellectual, spec);
    engine.transform(LiftTarget::All, TransformSpec::parse("decay=0.1").unwrap());

    let state = engine.state();
    assert_level(&state, Realm::Physical, 0.1);
    assert_level(&state, Realm::Intellectual, 0.7);
    assert_level(&state, Realm::Bridge, 0.5);
}

#[test]
fn controllers_share_one_engine() {
    let engine = Arc::new(Engine::new(EngineSettings::default()));
    thread::scope(|scope| {
        let writer = Arc::clone(&engine);
        scope.spawn(move || {
            for n in 0..50 {
                writer.record_entry(format!("note {n}"), Realm::Bridge);
            }
        });
        let router = Arc::clone(&engine);
        scope.spawn(move || {
            for _ in 0..50 {
                router.blow(Reservoir::Physical, Reservoir::Intellectual, 0.01);
                router.auto_balance();
            }
        });
        let reader = Arc::clone(&engine);
        scope.spawn(move || {
            for _ in 0..50 {
                assert_in_bounds(&reader.state());
            }
        });
    });

    let state = engine.state();
    assert_eq!(state.entries().len(), 50);
    assert_eq!(state.bridge(), Quantity::ONE);
    assert_in_bounds(&state);
}
