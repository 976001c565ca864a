//! Round-level protocol types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Winner of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    User,
    House,
    Tie,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::User => "user wins",
            Winner::House => "house wins",
            Winner::Tie => "tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Face value the user's die landed on.
    pub user_face: u32,
    /// Face value the house's die landed on.
    pub house_face: u32,
    pub winner: Winner,
    /// False when any of the round's commitments failed verification; the
    /// result still stands but the fairness claim for the round is void.
    pub verified: bool,
}

/// Cumulative score for the session. Mutated only by the session's resolve
/// step; each side's count is monotonically non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub user_wins: u32,
    pub house_wins: u32,
}

impl ScoreBoard {
    /// Credit the winning side; a tie credits neither.
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::User => self.user_wins += 1,
            Winner::House => self.house_wins += 1,
            Winner::Tie => {}
        }
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "you {} - {} me", self.user_wins, self.house_wins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_credits_exactly_one_side() {
        let mut scores = ScoreBoard::default();
        scores.record(Winner::User);
        assert_eq!((scores.user_wins, scores.house_wins), (1, 0));

        scores.record(Winner::House);
        assert_eq!((scores.user_wins, scores.house_wins), (1, 1));

        scores.record(Winner::Tie);
        assert_eq!((scores.user_wins, scores.house_wins), (1, 1));
    }

    #[test]
    fn test_winner_strings() {
        assert_eq!(Winner::User.as_str(), "user wins");
        assert_eq!(Winner::House.as_str(), "house wins");
        assert_eq!(Winner::Tie.as_str(), "tie");
    }
}
