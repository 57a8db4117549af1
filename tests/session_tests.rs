//! Game session integration tests.
//!
//! These tests drive full rounds through the public API with a scripted
//! random source and a manual clock.

use std::cell::RefCell;
use std::rc::Rc;

use guess_challenge::{
    GameSession, GuessResult, ManualClock, Outcome, PlayerProgress, PowerUpResult, RoundParams,
    Ruleset, ScriptedRng, TimeoutEvent,
};

// Power-up draw indices
const REVEAL: i64 = 0;
const NARROW: i64 = 1;
const EXTRA: i64 = 2;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn start(ruleset: Ruleset, script: &[i64]) -> (GameSession<ScriptedRng>, Rc<ManualClock>) {
    init_logger();
    let clock = Rc::new(ManualClock::new());
    let session = GameSession::start(ruleset, ScriptedRng::new(script.iter().copied()), clock.clone())
        .expect("valid ruleset");
    (session, clock)
}

// =============================================================================
// Guess Evaluation Tests
// =============================================================================

/// Guess 50 then 42 against a fixed target of 42, then record the win.
#[test]
fn test_win_scenario_updates_progress() {
    let (mut session, _) = start(Ruleset::challenge(), &[42]);
    let mut progress = PlayerProgress::new();

    assert_eq!(session.submit_guess(50), GuessResult::TooHigh);
    assert_eq!(session.submit_guess(42), GuessResult::Won { attempts: 2 });

    progress.record_round_result(true, 2);
    assert_eq!(progress.rounds_won(), 1);
    assert_eq!(progress.current_streak(), 1);
    assert_eq!(progress.currency(), 10);
}

/// The guess that uses the last attempt without matching loses the round.
#[test]
fn test_last_attempt_miss_loses() {
    let ruleset = Ruleset::challenge().with_initial_round(RoundParams::new(1, 100, 3, 60));
    let (mut session, _) = start(ruleset, &[42]);

    assert_eq!(session.submit_guess(1), GuessResult::TooLow);
    assert_eq!(session.submit_guess(2), GuessResult::TooLow);
    assert_eq!(session.submit_guess(3), GuessResult::LostAttempts { target: 42 });
    assert_eq!(session.outcome(), Outcome::LostAttempts);
    assert_eq!(session.attempts_used(), 3);
}

/// After a terminal outcome nothing is accepted or mutated.
#[test]
fn test_terminal_state_is_frozen() {
    let (mut session, clock) = start(Ruleset::challenge(), &[42, EXTRA]);
    session.submit_guess(42);

    let before = session.snapshot();
    assert_eq!(session.submit_guess(42), GuessResult::AlreadyOver);
    assert_eq!(session.use_power_up(), PowerUpResult::AlreadyOver);
    clock.advance_secs(120);
    assert!(session.tick().is_none());

    let after = session.snapshot();
    assert_eq!(after.guess_history, before.guess_history);
    assert_eq!(after.attempts_used, before.attempts_used);
    assert_eq!(after.power_up_charges, before.power_up_charges);
    assert_eq!(after.max_attempts, before.max_attempts);
    assert_eq!(session.outcome(), Outcome::Won);
}

// =============================================================================
// Power-Up Tests
// =============================================================================

/// Each power-up effect through the session.
#[test]
fn test_power_up_effects() {
    let (mut session, _) = start(Ruleset::challenge(), &[42, REVEAL, NARROW, EXTRA]);

    assert_eq!(session.use_power_up(), PowerUpResult::Reveal { digit: 2 });
    assert_eq!(session.min_range(), 1);
    assert_eq!(session.max_range(), 100);

    assert_eq!(session.use_power_up(), PowerUpResult::RangeNarrowed { min: 25, max: 76 });
    assert_eq!((session.min_range(), session.max_range()), (25, 76));

    assert_eq!(session.use_power_up(), PowerUpResult::ExtraAttempt { max_attempts: 11 });
    assert_eq!(session.power_up_charges(), 0);
    assert_eq!(session.use_power_up(), PowerUpResult::NoCharges);
    assert_eq!(session.target_number(), 42);
}

/// Repeated narrowing keeps a boundary target inside the live range.
#[test]
fn test_narrowing_keeps_boundary_target() {
    let (mut session, _) = start(Ruleset::challenge(), &[100, NARROW, NARROW, NARROW]);

    for _ in 0..3 {
        session.use_power_up();
        assert!(session.min_range() <= 100 && 100 <= session.max_range());
        assert!(session.min_range() < session.max_range());
    }
    assert_eq!(session.max_range(), 100);
}

/// Extra attempts let the round continue past the original limit.
#[test]
fn test_extra_attempt_extends_round() {
    let ruleset = Ruleset::challenge().with_initial_round(RoundParams::new(1, 100, 1, 60));
    let (mut session, _) = start(ruleset, &[42, EXTRA]);

    session.use_power_up();
    assert_eq!(session.submit_guess(10), GuessResult::TooLow);
    assert_eq!(session.submit_guess(42), GuessResult::Won { attempts: 2 });
}

/// Narrowing works across the full `i64` range.
#[test]
fn test_narrowing_full_i64_range() {
    let ruleset = Ruleset::challenge().with_initial_round(RoundParams::new(i64::MIN, i64::MAX, 10, 60));
    let (mut session, _) = start(ruleset, &[0, NARROW]);

    let quarter = (u64::MAX / 4) as i64;
    assert_eq!(
        session.use_power_up(),
        PowerUpResult::RangeNarrowed {
            min: i64::MIN + quarter,
            max: i64::MAX - quarter
        }
    );
    assert!(session.min_range() <= 0 && 0 <= session.max_range());
}

/// An extra attempt at the attempt ceiling saturates instead of wrapping.
#[test]
fn test_extra_attempt_at_ceiling_saturates() {
    let ruleset = Ruleset::challenge().with_initial_round(RoundParams::new(1, 100, u32::MAX, 60));
    let (mut session, _) = start(ruleset, &[42, EXTRA]);

    assert_eq!(
        session.use_power_up(),
        PowerUpResult::ExtraAttempt {
            max_attempts: u32::MAX
        }
    );
    assert_eq!(session.max_attempts(), u32::MAX);
    assert_eq!(session.power_up_charges(), 2);
}

// =============================================================================
// Timeout Tests
// =============================================================================

/// The timeout listener fires exactly once per round.
#[test]
fn test_timeout_listener_once_per_round() {
    let (mut session, clock) = start(Ruleset::challenge(), &[42]);
    let events: Rc<RefCell<Vec<TimeoutEvent>>> = Rc::default();
    let sink = events.clone();
    session.on_timeout(move |event| sink.borrow_mut().push(*event));

    session.submit_guess(10);
    clock.advance_secs(60);
    for _ in 0..5 {
        session.tick();
        clock.advance_secs(1);
    }

    assert_eq!(session.outcome(), Outcome::LostTimeout);
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0].attempts_used, 1);
    assert_eq!(events.borrow()[0].target, 42);

    // A fresh round re-arms the watch
    session.start_next_round().unwrap();
    clock.advance_secs(60);
    session.tick();
    assert_eq!(events.borrow().len(), 2);
}

/// A guess arriving after the deadline but before any tick loses to the timeout.
#[test]
fn test_expired_budget_rejects_guess() {
    let (mut session, clock) = start(Ruleset::challenge(), &[42]);
    let fired = Rc::new(RefCell::new(0));
    let counter = fired.clone();
    session.on_timeout(move |_| *counter.borrow_mut() += 1);

    clock.advance_secs(61);
    assert_eq!(session.submit_guess(42), GuessResult::AlreadyOver);
    assert_eq!(session.outcome(), Outcome::LostTimeout);
    assert!(session.guess_history().is_empty());
    assert_eq!(*fired.borrow(), 1);
}

/// A win stops the watch, so a later tick never overrides it.
#[test]
fn test_win_before_deadline_beats_timeout() {
    let (mut session, clock) = start(Ruleset::challenge(), &[42]);

    clock.advance_secs(59);
    assert_eq!(session.submit_guess(42), GuessResult::Won { attempts: 1 });
    clock.advance_secs(10);

    assert!(session.tick().is_none());
    assert_eq!(session.outcome(), Outcome::Won);
}

// =============================================================================
// Difficulty Tests
// =============================================================================

/// Difficulty from level 1 with range 1..=100, 60s, 10 attempts.
#[test]
fn test_increase_difficulty_from_level_one() {
    let (mut session, _) = start(Ruleset::challenge(), &[42, 77]);
    session.submit_guess(42);

    session.increase_difficulty();
    let next = session.round_params();
    assert_eq!(session.level(), 2);
    assert_eq!(next.max_range, 150);
    assert_eq!(next.time_budget_secs, 50);
    assert_eq!(next.max_attempts, 11);

    // Live round is untouched until the next one starts
    assert_eq!(session.max_range(), 100);

    session.start_next_round().unwrap();
    assert_eq!(session.max_range(), 150);
    assert_eq!(session.time_budget_secs(), 50);
    assert_eq!(session.max_attempts(), 11);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert_eq!(session.target_number(), 77);
}

/// Difficulty bounds hold over many levels.
#[test]
fn test_difficulty_bounds_over_many_levels() {
    let (mut session, _) = start(Ruleset::challenge(), &[1]);

    let mut last_max = session.round_params().max_range;
    for _ in 0..20 {
        session.increase_difficulty();
        let params = session.round_params();
        assert!(params.time_budget_secs >= 30);
        assert!(params.max_attempts <= 15);
        assert!(params.max_range > last_max);
        last_max = params.max_range;
    }
    assert_eq!(session.level(), 21);
    assert_eq!(session.round_params().time_budget_secs, 30);
    assert_eq!(session.round_params().max_attempts, 15);
}

/// Narrowed bounds do not leak into the next round's range.
#[test]
fn test_narrowing_does_not_affect_next_round() {
    let (mut session, _) = start(Ruleset::challenge(), &[50, NARROW]);

    session.use_power_up();
    session.submit_guess(50);
    session.increase_difficulty();
    session.start_next_round().unwrap();

    assert_eq!(session.min_range(), 1);
    assert_eq!(session.max_range(), 150);
    assert_eq!(session.power_up_charges(), 3);
}

/// A range entirely below zero still widens upward with the level.
#[test]
fn test_difficulty_on_negative_range() {
    let ruleset = Ruleset::challenge().with_initial_round(RoundParams::new(-20, -15, 10, 60));
    let (mut session, _) = start(ruleset, &[-17, -13]);
    session.submit_guess(-17);

    session.increase_difficulty();
    assert_eq!(session.round_params().min_range, -20);
    assert_eq!(session.round_params().max_range, -12);

    session.start_next_round().unwrap();
    assert_eq!((session.min_range(), session.max_range()), (-20, -12));
    assert_eq!(session.target_number(), -13);
}

// =============================================================================
// Round Setup Tests
// =============================================================================

/// Invalid explicit round parameters are rejected.
#[test]
fn test_start_round_validation() {
    let (mut session, _) = start(Ruleset::challenge(), &[42]);

    assert!(session.start_round(RoundParams::new(10, 5, 10, 60)).is_err());
    assert!(session.start_round(RoundParams::new(1, 100, 0, 60)).is_err());
    assert!(session.start_round(RoundParams::new(-20, -10, 4, 15)).is_ok());
    assert!((-20..=-10).contains(&session.target_number()));
    assert_eq!(session.time_budget_secs(), 15);
}
