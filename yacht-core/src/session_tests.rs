use std::time::{Duration, Instant};

use crate::category::Category;
use crate::dice::{Dice, Die};
use crate::session::{GameSession, OpOutcome, Rejection, MAX_ROLLS_PER_ROUND};
use crate::sheet::ScoreSheet;

fn assert_invariants(s: &GameSession) {
    assert!(s.rolls_used() <= MAX_ROLLS_PER_ROUND);
    for d in s.dice() {
        assert!(d.value <= 6);
    }
    assert_eq!(
        s.total_score(),
        s.sheet().entries().filter_map(|(_, v)| v).sum::<i32>()
    );
}

#[test]
fn fresh_session_awaits_first_roll() {
    let s = GameSession::with_seed(1);
    assert_eq!(s.rolls_used(), 0);
    assert!(s.can_roll());
    assert!(!s.has_rolled_this_round());
    assert!(!s.is_game_over());
    assert_eq!(s.total_score(), 0);
    assert!(s.dice().iter().all(|d| d.value == 0 && !d.held));
}

#[test]
fn roll_assigns_faces_and_counts_up() {
    let mut s = GameSession::with_seed(7);
    assert!(s.roll().applied());
    assert_eq!(s.rolls_used(), 1);
    assert!(s.dice().iter().all(|d| (1..=6).contains(&d.value)));
}

#[test]
fn roll_is_rejected_after_three_rolls_and_mutates_nothing() {
    let mut s = GameSession::with_seed(7);
    for _ in 0..3 {
        assert!(s.roll().applied());
    }
    let dice_before = *s.dice();
    assert_eq!(s.roll(), OpOutcome::Rejected(Rejection::NoRollsLeft));
    assert_eq!(*s.dice(), dice_before);
    assert_eq!(s.rolls_used(), 3);
}

#[test]
fn held_dice_survive_rerolls() {
    let mut s = GameSession::with_seed(42);
    s.roll();
    let kept = s.dice()[2].value;
    s.toggle_hold(2);
    // Rerolling many times must never disturb the held die.
    s.roll();
    assert_eq!(s.dice()[2].value, kept);
    s.roll();
    assert_eq!(s.dice()[2].value, kept);
}

#[test]
fn held_but_unrolled_die_still_gets_its_first_face() {
    let mut s = GameSession::with_seed(42);
    s.toggle_hold(0);
    s.roll();
    assert!((1..=6).contains(&s.dice()[0].value));
    assert!(s.dice()[0].held);
}

#[test]
fn toggle_hold_twice_restores_flags() {
    let mut s = GameSession::with_seed(3);
    s.roll();
    let before: Vec<bool> = s.dice().iter().map(|d| d.held).collect();
    s.toggle_hold(4);
    s.toggle_hold(4);
    let after: Vec<bool> = s.dice().iter().map(|d| d.held).collect();
    assert_eq!(before, after);
}

#[test]
fn toggle_hold_rejects_out_of_range_index() {
    let mut s = GameSession::with_seed(3);
    assert_eq!(s.toggle_hold(5), OpOutcome::Rejected(Rejection::NoSuchDie));
}

#[test]
fn clear_holds_releases_everything() {
    let mut s = GameSession::with_seed(3);
    s.roll();
    s.toggle_hold(0);
    s.toggle_hold(3);
    s.clear_holds();
    assert!(s.dice().iter().all(|d| !d.held));
}

#[test]
fn commit_before_any_roll_is_rejected() {
    let mut s = GameSession::with_seed(5);
    let now = Instant::now();
    assert_eq!(
        s.commit(Category::Choice, now),
        OpOutcome::Rejected(Rejection::NotRolledYet)
    );
    assert_eq!(s.sheet().filled_count(), 0);
    assert!(!s.reset_pending());
}

#[test]
fn commit_on_filled_category_is_rejected() {
    let mut s = GameSession::with_seed(5);
    let now = Instant::now();
    s.roll();
    assert!(s.commit(Category::Choice, now).applied());
    let recorded = s.sheet().get(Category::Choice);
    s.tick(now + Duration::from_secs(1));

    s.roll();
    assert_eq!(
        s.commit(Category::Choice, now),
        OpOutcome::Rejected(Rejection::CategoryFilled)
    );
    assert_eq!(s.sheet().get(Category::Choice), recorded);
    assert_eq!(s.sheet().filled_count(), 1);
}

#[test]
fn commit_records_score_and_defers_the_round_reset() {
    let mut s = GameSession::with_seed(11);
    let t0 = Instant::now();
    s.roll();
    let expected: i32 = s.dice().iter().map(|d| d.value as i32).sum();

    assert!(s.commit(Category::Choice, t0).applied());
    assert_eq!(s.sheet().get(Category::Choice), Some(expected));
    assert_eq!(s.total_score(), expected);

    // Until the deadline the committed round stays on the table.
    assert!(s.reset_pending());
    assert_eq!(s.rolls_used(), 1);
    assert!(!s.tick(t0 + Duration::from_millis(100)));
    assert_eq!(s.rolls_used(), 1);

    // At the deadline the next round starts.
    assert!(s.tick(t0 + Duration::from_millis(150)));
    assert!(!s.reset_pending());
    assert_eq!(s.rolls_used(), 0);
    assert!(s.dice().iter().all(|d| d.value == 0 && !d.held));
    // The recorded score survives the reset.
    assert_eq!(s.total_score(), expected);
}

#[test]
fn reset_supersedes_a_pending_round_reset() {
    let mut s = GameSession::with_seed(11);
    let t0 = Instant::now();
    s.roll();
    s.commit(Category::Yacht, t0);
    s.reset();
    assert!(!s.reset_pending());
    assert_eq!(s.sheet().filled_count(), 0);
    assert!(!s.tick(t0 + Duration::from_secs(1)));
    assert_eq!(s.rolls_used(), 0);
}

#[test]
fn best_category_prefers_highest_then_table_order() {
    let mut s = GameSession::with_seed(1);
    // All candidates are 0 on fresh dice; first in table order wins.
    assert_eq!(s.best_category(), Some(Category::Ones));

    // Committed categories drop out of the advisory.
    let now = Instant::now();
    s.roll();
    s.commit(Category::Ones, now);
    s.tick(now + Duration::from_secs(1));
    assert_eq!(s.best_category(), Some(Category::Twos));
}

#[test]
fn deterministic_replay_same_seed_same_states() {
    let run = |seed: u64| {
        let mut s = GameSession::with_seed(seed);
        let t = Instant::now();
        s.roll();
        s.toggle_hold(0);
        s.toggle_hold(3);
        s.roll();
        s.clear_holds();
        s.roll();
        s.commit(Category::Choice, t);
        (*s.dice(), s.sheet().clone())
    };
    assert_eq!(run(999), run(999));
}

#[test]
fn full_game_fills_every_category_then_locks() {
    let mut s = GameSession::with_seed(1234);
    let mut t = Instant::now();
    let mut recorded = Vec::new();

    for round in 0..12 {
        assert!(!s.is_game_over(), "game ended early in round {round}");
        assert!(s.roll().applied());
        assert_invariants(&s);

        let cat = s.best_category().expect("an empty slot must exist");
        assert!(s.commit(cat, t).applied());
        recorded.push(s.sheet().get(cat).expect("slot was just recorded"));

        t += Duration::from_secs(1);
        s.tick(t);
        assert_invariants(&s);
    }

    assert!(s.is_game_over());
    assert_eq!(s.sheet().filled_count(), 12);
    assert_eq!(s.total_score(), recorded.iter().sum::<i32>());
    assert_eq!(s.best_category(), None);

    // A finished game rejects further rolls.
    assert_eq!(s.roll(), OpOutcome::Rejected(Rejection::GameOver));
    assert!(!s.can_roll());
}

#[test]
fn resume_accepts_valid_parts() {
    let mut sheet = ScoreSheet::new();
    sheet.record(Category::Yacht, 50);
    let dice: Dice = [3, 3, 0, 5, 6].map(|value| Die { value, held: value == 3 });

    let s = GameSession::resume(dice, 2, sheet).expect("valid parts");
    assert_eq!(s.rolls_used(), 2);
    assert_eq!(s.total_score(), 50);
    assert_eq!(s.dice()[3].value, 5);
    assert!(s.dice()[0].held);
}

#[test]
fn resume_rejects_out_of_range_parts() {
    let dice: Dice = [1, 2, 3, 4, 5].map(|value| Die { value, held: false });
    assert!(GameSession::resume(dice, 4, ScoreSheet::new()).is_none());

    let bad: Dice = [1, 2, 3, 4, 7].map(|value| Die { value, held: false });
    assert!(GameSession::resume(bad, 1, ScoreSheet::new()).is_none());
}
