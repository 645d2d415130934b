//! Tests for gift mode
//!
//! Critical invariants tested:
//! - Near→far crossing counts an action but consumes no budget
//! - Far→near crossing consumes budget
//! - Street and the converting latch carry over between trips
//! - Near samples never leave attar negative

use arbor_trip_core::machine::{GiftMachine, GiftPlan, Phase, Region, Stage, Step, TripMachine};
use arbor_trip_core::orchestrator::{simulate_with, ModeConfig, RunConfig, TrialRunner};
use arbor_trip_core::rng::ScriptedRng;
use arbor_trip_core::{FarChoice, Knobs, NearChoice, ResourceState};

fn knobs() -> Knobs {
    Knobs {
        watchful: 75.0,
        ..Default::default()
    }
}

fn state(attar: i64, permission: i64) -> ResourceState {
    ResourceState {
        attar,
        permission,
        ..Default::default()
    }
}

// ============================================================================
// Crossings
// ============================================================================

#[test]
fn test_near_to_far_crossing_is_free() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs());
    let mut state = state(5, 3);
    let mut rng = ScriptedRng::constant(0.0);

    let step = machine.step(&mut state, &mut rng);
    state.permission -= step.budget;

    assert_eq!(step, Step::free());
    assert_eq!(step.actions, 1);
    assert_eq!(state.permission, 3);
    assert_eq!(machine.phase().region, Region::Far);
    assert_eq!(machine.street(), 3);
    assert_eq!(state.attar, 5);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn test_far_to_near_crossing_costs_budget() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs())
        .with_position(Phase::building(Region::Far), 5);
    let mut state = state(2, 3);
    let mut rng = ScriptedRng::constant(0.0);

    let step = machine.step(&mut state, &mut rng);
    state.permission -= step.budget;

    assert_eq!(step, Step::action());
    assert_eq!(state.permission, 2);
    assert_eq!(machine.phase(), Phase::building(Region::Near));
    assert_eq!(machine.street(), 3);
}

#[test]
fn test_far_at_return_threshold_stays() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs())
        .with_position(Phase::building(Region::Far), 3);
    let mut state = state(3, 3);
    let mut rng = ScriptedRng::constant(0.0);

    machine.step(&mut state, &mut rng);

    assert_eq!(machine.phase().region, Region::Far);
    // Walk succeeded at street 3
    assert_eq!(state.attar, 5);
}

// ============================================================================
// Trip Start
// ============================================================================

#[test]
fn test_trip_start_region_and_entry_cost() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs());

    let mut s = state(6, 5);
    machine.begin_trip(&mut s);
    assert_eq!(machine.phase().region, Region::Far);
    assert_eq!(s.attar, 5);

    let mut s = state(5, 5);
    machine.begin_trip(&mut s);
    assert_eq!(machine.phase().region, Region::Near);
    assert_eq!(s.attar, 4);

    let mut s = state(0, 5);
    machine.begin_trip(&mut s);
    assert_eq!(machine.phase().region, Region::Near);
    assert_eq!(s.attar, 0);
}

// ============================================================================
// Region Logic
// ============================================================================

#[test]
fn test_near_failure_clamps_attar() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs());
    let mut state = state(0, 5);
    let mut rng = ScriptedRng::constant(ScriptedRng::JUST_BELOW_ONE);

    machine.step(&mut state, &mut rng);

    assert_eq!(state.attar, 0);
    // tier 6 failure → 1 cp
    assert_eq!(state.watchful, 1);
}

#[test]
fn test_tend_walks_then_spends_budget() {
    let plan = GiftPlan {
        near: NearChoice::Tend,
        ..Default::default()
    };
    let mut machine = GiftMachine::new(plan, &knobs());
    let mut rng = ScriptedRng::constant(0.0);

    let (state, actions) = TrialRunner::new(&mut rng).run(&mut machine, 1);

    // two walking actions, then tend with 3 budget left
    assert_eq!(actions, 5);
    assert_eq!(state.attar, 3);
    assert_eq!(state.permission, 0);
    assert_eq!(machine.street(), 5);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn test_surrender_earns_energy() {
    let plan = GiftPlan {
        far: FarChoice::Surrender,
        ..Default::default()
    };
    let knobs = Knobs {
        persuasive: 100.0,
        ..Default::default()
    };
    let mut machine = GiftMachine::new(plan, &knobs).with_position(Phase::building(Region::Far), 4);
    let mut s = state(8, 5);
    let mut rng = ScriptedRng::new(vec![0.0, 0.9]);

    machine.step(&mut s, &mut rng);
    assert_eq!((s.attar, s.pennies, s.energy), (5, 750, 3));
    machine.step(&mut s, &mut rng);
    assert_eq!((s.attar, s.pennies, s.energy), (6, 1000, 4));
    // tier 6: 3 cp then 1 cp
    assert_eq!(s.persuasive, 4);
}

// ============================================================================
// Multi-trip Traces
// ============================================================================

/// Three trips, every check succeeding, no bulk exchange:
///
/// 1. near: attar 2, 4, 6; free crossing; far walk 8, 10
/// 2. far: entry 9; walk 11, 13, 15 (latched); walk to street 5
/// 3. far: entry 14; gift 11, 8, 5, 2 (unlatched); cross home
#[test]
fn test_three_trip_trace() {
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs());
    let mut rng = ScriptedRng::constant(0.0);
    let mut runner = TrialRunner::new(&mut rng);

    let (state, actions) = runner.run(&mut machine, 1);
    assert_eq!(actions, 8);
    assert_eq!(state.attar, 10);
    assert_eq!(machine.phase(), Phase::building(Region::Far));

    let (state, actions) = runner.run_from(state, &mut machine, 1);
    assert_eq!(actions, 7);
    assert_eq!(state.attar, 15);
    assert!(machine.is_converting());
    assert_eq!(machine.street(), 5);

    let (state, actions) = runner.run_from(state, &mut machine, 1);
    assert_eq!(actions, 7);
    assert_eq!(state.attar, 2);
    assert_eq!(state.pennies, 4 * 1250);
    assert!(!machine.is_converting());
    assert_eq!(machine.phase(), Phase::building(Region::Near));
    assert_eq!(machine.street(), 3);

    assert_eq!(state.num_trips, 3);
    // 5 near/far samples in trip 1, 3 in trip 2, at 3 cp each
    assert_eq!(state.watchful, 24);
}

#[test]
fn test_converting_latch_survives_trip_boundary() {
    let latched = Phase::new(Region::Far, Stage::GiftFar);
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs()).with_position(latched, 5);
    let mut s = state(20, 0);

    machine.begin_trip(&mut s);

    assert!(machine.is_converting());
    assert_eq!(machine.street(), 5);
    assert_eq!(s.attar, 19);
}

#[test]
fn test_bulk_exchange_empties_stock() {
    let knobs = Knobs {
        watchful: 75.0,
        rare_chance: 100.0,
        ..Default::default()
    };
    let latched = Phase::new(Region::Far, Stage::GiftFar);
    let mut machine = GiftMachine::new(GiftPlan::default(), &knobs).with_position(latched, 5);
    let mut s = state(14, 5);
    let mut rng = ScriptedRng::constant(0.5);

    machine.step(&mut s, &mut rng);

    // round(14 / 3) = 5 lots
    assert_eq!(s.pennies, 5 * 1250);
    assert_eq!(s.attar, 0);
    assert!(!machine.is_converting());
}

#[test]
fn test_attar_limit_override() {
    let mode = ModeConfig::from_selector("gift")
        .unwrap()
        .with_strategy(None, Some(FarChoice::Witness))
        .with_attar_limit(9);
    let ModeConfig::Gift(plan) = mode else {
        panic!("expected gift mode");
    };
    assert_eq!(plan.attar_limit, 9);
    assert_eq!(plan.near, NearChoice::Explore);
    assert_eq!(plan.far, FarChoice::Witness);
}

#[test]
fn test_gift_run_produces_pennies() {
    let knobs = Knobs {
        watchful: 230.0,
        rare_chance: 10.0,
        num_trials: 500,
        ..Default::default()
    };
    let mode = ModeConfig::from_selector("gift").unwrap();
    let config = RunConfig::new(mode, knobs);
    let mut rng = arbor_trip_core::RngManager::new(2024);

    let outcome = simulate_with(&config, &mut rng);

    assert_eq!(outcome.state.num_trips, 500);
    assert!(outcome.state.pennies > 0);
    assert!(outcome.actions >= 500 * 3);
}
