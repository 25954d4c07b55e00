//! Scoring categories in their fixed table order.

/// Number of scoring categories.
pub const NUM_CATEGORIES: usize = 12;

/// One scoring slot. A player fills each exactly once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    Choice,
    FourOfAKind,
    FullHouse,
    LittleStraight,
    BigStraight,
    Yacht,
}

impl Category {
    /// All categories in table order. Tie-breaks and display follow this
    /// order everywhere.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::Choice,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::LittleStraight,
        Category::BigStraight,
        Category::Yacht,
    ];

    /// Position in the fixed table order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used by snapshots and event logs.
    pub fn name(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::Choice => "choice",
            Category::FourOfAKind => "four_of_a_kind",
            Category::FullHouse => "full_house",
            Category::LittleStraight => "little_straight",
            Category::BigStraight => "big_straight",
            Category::Yacht => "yacht",
        }
    }

    /// Inverse of [`Category::name`].
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Human-readable label for table display.
    pub fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones (1)",
            Category::Twos => "Twos (2)",
            Category::Threes => "Threes (3)",
            Category::Fours => "Fours (4)",
            Category::Fives => "Fives (5)",
            Category::Sixes => "Sixes (6)",
            Category::Choice => "Choice",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::LittleStraight => "Little Straight",
            Category::BigStraight => "Big Straight",
            Category::Yacht => "Yacht",
        }
    }
}
