//! Category scoring for a five-die hand.
//!
//! All scorers are pure and total: any hand, including one with unrolled
//! (value 0) dice, produces a score. Unrolled dice match no face.

use crate::category::{Category, NUM_CATEGORIES};
use crate::dice::{dice_total, face_counts, Dice};

/// Fixed award for a little straight (1-2-3-4-5).
pub const LITTLE_STRAIGHT_SCORE: i32 = 30;
/// Fixed award for a big straight (2-3-4-5-6).
pub const BIG_STRAIGHT_SCORE: i32 = 30;
/// Fixed award for five of a kind.
pub const YACHT_SCORE: i32 = 50;

/// Score one category against the hand.
pub fn score(category: Category, dice: &Dice) -> i32 {
    let counts = face_counts(dice);
    score_with_counts(category, dice, &counts)
}

/// Compute the achievable score for every category at once.
pub fn candidate_scores(dice: &Dice) -> [i32; NUM_CATEGORIES] {
    let counts = face_counts(dice);
    let mut out = [0i32; NUM_CATEGORIES];
    for (i, &cat) in Category::ALL.iter().enumerate() {
        out[i] = score_with_counts(cat, dice, &counts);
    }
    out
}

fn score_with_counts(category: Category, dice: &Dice, counts: &[u8; 7]) -> i32 {
    match category {
        Category::Ones => face_total(counts, 1),
        Category::Twos => face_total(counts, 2),
        Category::Threes => face_total(counts, 3),
        Category::Fours => face_total(counts, 4),
        Category::Fives => face_total(counts, 5),
        Category::Sixes => face_total(counts, 6),
        Category::Choice => dice_total(dice),
        Category::FourOfAKind => four_of_a_kind(counts),
        Category::FullHouse => {
            if is_full_house(counts) {
                dice_total(dice)
            } else {
                0
            }
        }
        Category::LittleStraight => {
            if is_little_straight(counts) {
                LITTLE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::BigStraight => {
            if is_big_straight(counts) {
                BIG_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yacht => {
            if is_yacht(counts) {
                YACHT_SCORE
            } else {
                0
            }
        }
    }
}

fn face_total(counts: &[u8; 7], face: u8) -> i32 {
    counts[face as usize] as i32 * face as i32
}

/// Highest face with four or more matching dice, scored as exactly four
/// of that face. Five of a kind still scores only the four.
fn four_of_a_kind(counts: &[u8; 7]) -> i32 {
    for face in (1..=6i32).rev() {
        if counts[face as usize] >= 4 {
            return face * 4;
        }
    }
    0
}

/// Exactly one pair plus one triple on distinct faces. Five of a kind
/// does not qualify.
fn is_full_house(counts: &[u8; 7]) -> bool {
    let mut nonzero: Vec<u8> = counts[1..].iter().copied().filter(|&c| c != 0).collect();
    nonzero.sort_unstable();
    nonzero == [2, 3]
}

fn is_little_straight(counts: &[u8; 7]) -> bool {
    counts[1] == 1
        && counts[2] == 1
        && counts[3] == 1
        && counts[4] == 1
        && counts[5] == 1
        && counts[6] == 0
}

fn is_big_straight(counts: &[u8; 7]) -> bool {
    counts[1] == 0
        && counts[2] == 1
        && counts[3] == 1
        && counts[4] == 1
        && counts[5] == 1
        && counts[6] == 1
}

fn is_yacht(counts: &[u8; 7]) -> bool {
    counts[1..].iter().any(|&c| c == 5)
}
