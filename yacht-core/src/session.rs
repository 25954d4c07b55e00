//! Round and game state machine.
//!
//! This module is the single place that mutates game state via the rules.
//! Caller mistakes (rolling past the budget, committing twice, committing
//! before any roll) are not errors: every mutator returns an [`OpOutcome`],
//! and a rejected operation leaves the whole state untouched.

use std::time::{Duration, Instant};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::category::{Category, NUM_CATEGORIES};
use crate::dice::{fresh_dice, Dice};
use crate::scoring::{candidate_scores, score};
use crate::sheet::ScoreSheet;

/// Total throws allowed per round (first roll plus two rerolls).
pub const MAX_ROLLS_PER_ROUND: u8 = 3;

/// Delay between a committed score and the automatic round reset, so the
/// committed value stays visible briefly before the board clears.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(150);

/// Why a mutator left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The round's roll budget is spent.
    NoRollsLeft,
    /// Every category is already recorded.
    GameOver,
    /// Committing requires at least one roll this round.
    NotRolledYet,
    /// The target category already holds a score.
    CategoryFilled,
    /// Die index out of range.
    NoSuchDie,
}

/// Result of a mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutcome {
    Applied,
    Rejected(Rejection),
}

impl OpOutcome {
    pub fn applied(self) -> bool {
        matches!(self, OpOutcome::Applied)
    }
}

/// A single player's game: dice on the table, the roll budget of the
/// current round, and the score sheet.
pub struct GameSession {
    dice: Dice,
    rolls_used: u8,
    sheet: ScoreSheet,
    rng: ChaCha8Rng,
    reset_delay: Duration,
    pending_reset: Option<Instant>,
}

impl GameSession {
    /// Fresh game with an entropy-seeded dice stream.
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Fresh game with a fixed dice stream, for reproducible play.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(fresh_dice(), 0, ScoreSheet::new(), seed)
    }

    /// Rebuild a session from previously saved parts. Returns `None` when
    /// a field is out of range; callers fall back to a fresh game.
    pub fn resume(dice: Dice, rolls_used: u8, sheet: ScoreSheet) -> Option<Self> {
        if rolls_used > MAX_ROLLS_PER_ROUND {
            return None;
        }
        if dice.iter().any(|d| d.value > 6) {
            return None;
        }
        Some(Self::from_parts(dice, rolls_used, sheet, rand::thread_rng().gen()))
    }

    fn from_parts(dice: Dice, rolls_used: u8, sheet: ScoreSheet, seed: u64) -> Self {
        Self {
            dice,
            rolls_used,
            sheet,
            rng: ChaCha8Rng::seed_from_u64(seed),
            reset_delay: DEFAULT_RESET_DELAY,
            pending_reset: None,
        }
    }

    pub fn set_reset_delay(&mut self, delay: Duration) {
        self.reset_delay = delay;
    }

    // --- mutators ---

    /// Throw every die that is not held. A held die keeps its face, except
    /// that a die which has never been rolled always receives its first
    /// face. Rejected once the roll budget is spent or the game is over.
    pub fn roll(&mut self) -> OpOutcome {
        if self.sheet.is_complete() {
            return OpOutcome::Rejected(Rejection::GameOver);
        }
        if self.rolls_used >= MAX_ROLLS_PER_ROUND {
            return OpOutcome::Rejected(Rejection::NoRollsLeft);
        }
        for die in &mut self.dice {
            if !die.held || die.value == 0 {
                die.value = self.rng.gen_range(1..=6);
            }
        }
        self.rolls_used += 1;
        OpOutcome::Applied
    }

    /// Flip the hold flag on one die. No roll-count precondition: holding
    /// an unrolled die is permitted.
    pub fn toggle_hold(&mut self, index: usize) -> OpOutcome {
        let Some(die) = self.dice.get_mut(index) else {
            return OpOutcome::Rejected(Rejection::NoSuchDie);
        };
        die.held = !die.held;
        OpOutcome::Applied
    }

    /// Release every hold. Unconditional.
    pub fn clear_holds(&mut self) {
        for die in &mut self.dice {
            die.held = false;
        }
    }

    /// Record the category's score for the current dice (zero is a valid
    /// forfeit) and schedule the round reset at `now + reset_delay`.
    pub fn commit(&mut self, category: Category, now: Instant) -> OpOutcome {
        if self.rolls_used == 0 {
            return OpOutcome::Rejected(Rejection::NotRolledYet);
        }
        if self.sheet.get(category).is_some() {
            return OpOutcome::Rejected(Rejection::CategoryFilled);
        }
        let value = score(category, &self.dice);
        let recorded = self.sheet.record(category, value);
        debug_assert!(recorded);
        self.pending_reset = Some(now + self.reset_delay);
        OpOutcome::Applied
    }

    /// Clear the sheet and start a fresh round. Supersedes any pending
    /// deferred reset.
    pub fn reset(&mut self) {
        self.sheet = ScoreSheet::new();
        self.pending_reset = None;
        self.start_new_round();
    }

    /// Fire a due deferred round reset. Starting a new round is idempotent,
    /// so a stale fire after an intervening [`GameSession::reset`] would be
    /// harmless; it is cancelled anyway. Returns whether a reset fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_reset {
            Some(due) if now >= due => {
                self.pending_reset = None;
                self.start_new_round();
                true
            }
            _ => false,
        }
    }

    fn start_new_round(&mut self) {
        self.dice = fresh_dice();
        self.rolls_used = 0;
    }

    // --- read accessors ---

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn rolls_used(&self) -> u8 {
        self.rolls_used
    }

    pub fn sheet(&self) -> &ScoreSheet {
        &self.sheet
    }

    pub fn total_score(&self) -> i32 {
        self.sheet.total()
    }

    pub fn is_game_over(&self) -> bool {
        self.sheet.is_complete()
    }

    pub fn can_roll(&self) -> bool {
        self.rolls_used < MAX_ROLLS_PER_ROUND && !self.sheet.is_complete()
    }

    pub fn has_rolled_this_round(&self) -> bool {
        self.rolls_used > 0
    }

    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_some()
    }

    /// Achievable score per category for the dice on the table.
    pub fn candidate_scores(&self) -> [i32; NUM_CATEGORIES] {
        candidate_scores(&self.dice)
    }

    /// Advisory: the empty category with the highest achievable score for
    /// the current dice; ties go to the first in table order. `None` once
    /// the sheet is full. Never blocks or alters a commit.
    pub fn best_category(&self) -> Option<Category> {
        let mut best: Option<(Category, i32)> = None;
        for &cat in &Category::ALL {
            if self.sheet.get(cat).is_some() {
                continue;
            }
            let value = score(cat, &self.dice);
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((cat, value)),
            }
        }
        best.map(|(cat, _)| cat)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
