//! Property-based tests for the state invariants.
//!
//! Random operation sequences must never push a level outside the unit
//! interval, routing must never touch the entry log or the bridge, and the
//! transform algebra must hold for arbitrary inputs.

use proptest::prelude::*;

use tandem_core::transform::{
    bind, boost, clamp, compose, decay, fold, identity, offset, pipe, scale,
};
use tandem_core::{EnergyRouter, RoutingMessage, apply_routing_result};
use tandem_engine::{Engine, EngineSettings, Realm, Reservoir, State};

use crate::common::{arb_amount, arb_op, arb_reservoir, arb_state, assert_in_bounds};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn levels_stay_in_bounds_under_any_operation_sequence(
        start in arb_state(),
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let engine = Engine::with_state(EngineSettings::default(), start);
        for op in &ops {
            op.apply(&engine);
            assert_in_bounds(&engine.state());
        }
    }

    #[test]
    fn entry_log_only_grows_and_keeps_its_prefix(
        ops in prop::collection::vec(arb_op(), 0..48),
    ) {
        let engine = Engine::default();
        let mut previous = engine.state().entries().to_vec();
        for op in &ops {
            op.apply(&engine);
            let state = engine.state();
            prop_assert!(state.entries().len() >= previous.len());
            prop_assert_eq!(&state.entries()[..previous.len()], previous.as_slice());
            previous = state.entries().to_vec();
        }
    }

    #[test]
    fn clamp_is_idempotent(x in prop::num::f64::ANY) {
        let once = clamp(x);
        prop_assert!((0.0..=1.0).contains(&once));
        prop_assert_eq!(clamp(once), once);
    }

    #[test]
    fn compose_applies_right_to_left(
        x in 0.0f64..=1.0,
        factor in 0.0f64..3.0,
        delta in -1.0f64..1.0,
    ) {
        let f = scale(factor);
        let g = offset(delta);
        prop_assert_eq!(compose(f, g)(x), bind(bind(x, g), f));
        prop_assert_eq!(pipe(g, f)(x), compose(f, g)(x));
    }

    #[test]
    fn identity_is_neutral_for_composition(x in 0.0f64..=1.0, amount in 0.0f64..0.5) {
        let f = boost(amount);
        prop_assert_eq!(compose(identity, f)(x), f(x));
        prop_assert_eq!(compose(f, identity)(x), f(x));
    }

    #[test]
    fn fold_matches_manual_application(x in 0.0f64..=1.0, rate in 0.0f64..0.2) {
        let steps = [decay(rate), decay(rate), decay(rate)];
        let manual = decay(rate)(decay(rate)(decay(rate)(x)));
        prop_assert_eq!(fold(steps, x), manual);
    }

    #[test]
    fn blow_loses_exactly_a_fifth(
        from in arb_reservoir(),
        source in 0.2f64..=1.0,
        fraction in 0.01f64..=1.0,
    ) {
        // Destination starts empty so the credit never saturates.
        let state = match from {
            Reservoir::Physical => State::new(source, 0.0, 0.5),
            Reservoir::Intellectual => State::new(0.0, source, 0.5),
        };
        let amount = source * fraction;
        let message = RoutingMessage::Blow {
            from: from.realm(),
            to: from.other().realm(),
            amount,
        };
        let result = EnergyRouter::default().route(&message, &state);
        prop_assert!(result.is_success());
        prop_assert!((result.delta(from.realm()) + amount).abs() < 1e-12);
        prop_assert!((result.delta(from.other().realm()) - amount * 0.8).abs() < 1e-12);

        let next = apply_routing_result(&result, &state);
        let lost = state.total_energy() - next.total_energy();
        prop_assert!((lost - amount * 0.2).abs() < 1e-9);
    }

    #[test]
    fn suck_credits_more_than_blow(
        from in arb_reservoir(),
        amount in 0.01f64..=0.5,
    ) {
        let state = State::new(0.5, 0.5, 0.5);
        let router = EnergyRouter::default();
        let to = from.other().realm();
        let blow = router.route(&RoutingMessage::Blow { from: from.realm(), to, amount }, &state);
        let suck = router.route(&RoutingMessage::Suck { from: from.realm(), to, amount }, &state);
        prop_assert!(suck.delta(to) > blow.delta(to));
        prop_assert_eq!(suck.delta(from.realm()), blow.delta(from.realm()));
    }

    #[test]
    fn refused_transfers_change_nothing(
        start in arb_state(),
        pull in any::<bool>(),
        from in arb_reservoir(),
        amount in arb_amount(),
    ) {
        let engine = Engine::with_state(EngineSettings::default(), start.clone());
        let result = if pull {
            engine.suck(from, from.other(), amount)
        } else {
            engine.blow(from, from.other(), amount)
        };
        if !result.is_success() {
            prop_assert_eq!(&*engine.state(), &start);
            prop_assert!(result.deltas().is_empty());
        }
    }

    #[test]
    fn overdrawn_transfers_of_either_kind_are_refused(
        start in arb_state(),
        pull in any::<bool>(),
        from in arb_reservoir(),
        excess in 0.001f64..0.5,
    ) {
        let engine = Engine::with_state(EngineSettings::default(), start.clone());
        let amount = start.level(from.realm()).get() + excess;
        let result = if pull {
            engine.suck(from, from.other(), amount)
        } else {
            engine.blow(from, from.other(), amount)
        };
        prop_assert!(!result.is_success());
        prop_assert!(result.message().to_lowercase().contains("insufficient"));
        prop_assert_eq!(&*engine.state(), &start);
    }

    #[test]
    fn balance_strictly_narrows_a_real_gap(
        physical in 0.0f64..=1.0,
        intellectual in 0.0f64..=1.0,
        bridge in 0.0f64..=1.0,
    ) {
        let state = State::new(physical, intellectual, bridge);
        let before = state.physical().distance(state.intellectual());
        prop_assume!(before > 0.01);

        let message = RoutingMessage::Balance {
            first: Realm::Physical,
            second: Realm::Intellectual,
        };
        let result = EnergyRouter::default().route(&message, &state);
        let next = apply_routing_result(&result, &state);
        let after = next.physical().distance(next.intellectual());
        prop_assert!(after < before);
        // Levels never cross.
        prop_assert_eq!(
            state.physical() >= state.intellectual(),
            next.physical() >= next.intellectual()
        );
        prop_assert!((next.total_energy() - state.total_energy()).abs() < 1e-9);
    }

    #[test]
    fn routing_never_touches_bridge_or_entries(
        start in arb_state(),
        ops in prop::collection::vec(
            prop_oneof![
                (arb_reservoir(), arb_amount()).prop_map(|(r, a)| (0u8, r, a)),
                (arb_reservoir(), arb_amount()).prop_map(|(r, a)| (1u8, r, a)),
                Just((2u8, Reservoir::Physical, 0.0)),
            ],
            1..32,
        ),
    ) {
        let engine = Engine::with_state(EngineSettings::default(), start);
        engine.record_entry("anchor", Realm::Bridge);
        let anchored = engine.state();
        for (kind, from, amount) in ops {
            let _routed = match kind {
                0 => engine.blow(from, from.other(), amount),
                1 => engine.suck(from, from.other(), amount),
                _ => engine.auto_balance(),
            };
        }
        let state = engine.state();
        prop_assert_eq!(state.bridge(), anchored.bridge());
        prop_assert_eq!(state.entries(), anchored.entries());
    }

    #[test]
    fn harmony_is_symmetric_and_linear_in_bridge(
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        bridge in 0.0f64..=1.0,
    ) {
        let forward = State::new(a, b, bridge).harmony().get();
        let backward = State::new(b, a, bridge).harmony().get();
        prop_assert!((forward - backward).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&forward));

        let full = State::new(a, b, 1.0).harmony().get();
        prop_assert!((forward - full * bridge).abs() < 1e-9);
        prop_assert!(forward <= bridge + 1e-12);
    }
}
