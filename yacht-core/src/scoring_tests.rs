use crate::category::Category;
use crate::dice::{fresh_dice, Dice, Die};
use crate::scoring::{candidate_scores, score};

fn hand(values: [u8; 5]) -> Dice {
    values.map(|value| Die { value, held: false })
}

#[test]
fn upper_categories_sum_matching_faces() {
    let d = hand([1, 1, 3, 3, 3]);
    assert_eq!(score(Category::Ones, &d), 2);
    assert_eq!(score(Category::Twos, &d), 0);
    assert_eq!(score(Category::Threes, &d), 9);
    assert_eq!(score(Category::Sixes, &hand([6, 6, 6, 2, 1])), 18);
}

#[test]
fn choice_sums_all_five() {
    assert_eq!(score(Category::Choice, &hand([1, 2, 3, 4, 5])), 15);
    assert_eq!(score(Category::Choice, &hand([6, 6, 6, 6, 6])), 30);
}

#[test]
fn four_of_a_kind_counts_only_four_dice() {
    assert_eq!(score(Category::FourOfAKind, &hand([6, 6, 6, 6, 5])), 24);
    // Five of a kind still scores only the four matching dice.
    assert_eq!(score(Category::FourOfAKind, &hand([3, 3, 3, 3, 3])), 12);
    assert_eq!(score(Category::FourOfAKind, &hand([2, 2, 2, 5, 5])), 0);
    assert_eq!(score(Category::FourOfAKind, &hand([1, 1, 1, 1, 6])), 4);
}

#[test]
fn full_house_is_exactly_pair_plus_triple() {
    assert_eq!(score(Category::FullHouse, &hand([2, 2, 3, 3, 3])), 13);
    assert_eq!(score(Category::FullHouse, &hand([1, 1, 2, 2, 2])), 8);
    // Five of a kind is excluded.
    assert_eq!(score(Category::FullHouse, &hand([5, 5, 5, 5, 5])), 0);
    assert_eq!(score(Category::FullHouse, &hand([4, 4, 4, 4, 2])), 0);
    assert_eq!(score(Category::FullHouse, &hand([1, 2, 3, 3, 3])), 0);
}

#[test]
fn straights_require_exact_runs() {
    assert_eq!(score(Category::LittleStraight, &hand([1, 2, 3, 4, 5])), 30);
    assert_eq!(score(Category::LittleStraight, &hand([5, 4, 3, 2, 1])), 30);
    assert_eq!(score(Category::LittleStraight, &hand([1, 2, 3, 4, 4])), 0);
    assert_eq!(score(Category::LittleStraight, &hand([2, 3, 4, 5, 6])), 0);

    assert_eq!(score(Category::BigStraight, &hand([2, 3, 4, 5, 6])), 30);
    assert_eq!(score(Category::BigStraight, &hand([6, 5, 4, 3, 2])), 30);
    assert_eq!(score(Category::BigStraight, &hand([1, 2, 3, 4, 5])), 0);
    assert_eq!(score(Category::BigStraight, &hand([2, 2, 4, 5, 6])), 0);
}

#[test]
fn yacht_is_five_matching_faces() {
    assert_eq!(score(Category::Yacht, &hand([4, 4, 4, 4, 4])), 50);
    assert_eq!(score(Category::Yacht, &hand([4, 4, 4, 4, 5])), 0);
}

#[test]
fn unrolled_dice_match_no_face() {
    let d = fresh_dice();
    for cat in Category::ALL {
        assert_eq!(score(cat, &d), 0, "fresh dice must score 0 for {cat:?}");
    }

    // Partially rolled hands score only the real faces.
    let mut d = fresh_dice();
    d[0].value = 5;
    d[1].value = 5;
    assert_eq!(score(Category::Fives, &d), 10);
    assert_eq!(score(Category::Choice, &d), 10);
    assert_eq!(score(Category::Yacht, &d), 0);
}

#[test]
fn candidate_scores_match_per_category_scoring_exhaustively() {
    // All 6^5 = 7776 hands.
    for a in 1u8..=6 {
        for b in 1u8..=6 {
            for c in 1u8..=6 {
                for d in 1u8..=6 {
                    for e in 1u8..=6 {
                        let dice = hand([a, b, c, d, e]);
                        let all = candidate_scores(&dice);
                        for (i, cat) in Category::ALL.into_iter().enumerate() {
                            assert_eq!(all[i], score(cat, &dice), "mismatch for {dice:?}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn exhaustive_structural_sanity() {
    for a in 1u8..=6 {
        for b in 1u8..=6 {
            for c in 1u8..=6 {
                for d in 1u8..=6 {
                    for e in 1u8..=6 {
                        let dice = hand([a, b, c, d, e]);
                        let all = candidate_scores(&dice);
                        assert!(all.iter().all(|&s| s >= 0));

                        // A hand is never both a full house and a yacht.
                        let fh = all[Category::FullHouse.index()];
                        let ya = all[Category::Yacht.index()];
                        assert!(fh == 0 || ya == 0, "hand {dice:?}");

                        // Four of a kind is always 4*face or 0.
                        let fk = all[Category::FourOfAKind.index()];
                        assert!(fk == 0 || (fk % 4 == 0 && (4..=24).contains(&fk)));
                    }
                }
            }
        }
    }
}
