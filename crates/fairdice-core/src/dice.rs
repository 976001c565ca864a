//! Dice configurations and the probability comparison engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Startup dice-configuration errors. Fatal: reported before any game state
/// is created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one dice configuration is required")]
    NoDice,

    #[error("dice configuration {index} is empty")]
    EmptyDie { index: usize },

    #[error("invalid face {token:?} in dice configuration {index}: faces must be positive integers")]
    BadFace { index: usize, token: String },
}

/// One die: a non-empty ordered list of positive face values. Supplied once
/// at startup and immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die(Vec<u32>);

impl Die {
    /// Create from a face list. Callers must guarantee non-empty positive
    /// faces; [`parse_dice`] is the validated entry point.
    pub fn new(faces: Vec<u32>) -> Self {
        assert!(!faces.is_empty(), "a die needs at least one face");
        assert!(faces.iter().all(|&f| f > 0), "faces must be positive");
        Self(faces)
    }

    /// All face values in declaration order.
    pub fn faces(&self) -> &[u32] {
        &self.0
    }

    /// Number of faces, which is also the draw range for a roll.
    pub fn sides(&self) -> u32 {
        self.0.len() as u32
    }

    /// Face value at the given index.
    pub fn face(&self, index: u32) -> u32 {
        self.0[index as usize]
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// Parse startup arguments into dice, one comma-separated face list per
/// argument. Any non-positive or non-numeric token is fatal and names both
/// the token and the configuration it came from.
pub fn parse_dice<I, S>(args: I) -> Result<Vec<Die>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut dice = Vec::new();
    for (index, arg) in args.into_iter().enumerate() {
        let arg = arg.as_ref().trim();
        if arg.is_empty() {
            return Err(ConfigError::EmptyDie { index });
        }
        let mut faces = Vec::new();
        for token in arg.split(',') {
            let token = token.trim();
            let face = token
                .parse::<u32>()
                .ok()
                .filter(|&f| f > 0)
                .ok_or_else(|| ConfigError::BadFace {
                    index,
                    token: token.to_string(),
                })?;
            faces.push(face);
        }
        dice.push(Die(faces));
    }
    if dice.is_empty() {
        return Err(ConfigError::NoDice);
    }
    Ok(dice)
}

/// Exhaustive cross-product comparison of two dice: (wins, ties, losses)
/// from `a`'s point of view. The three counts always sum to
/// `|a| * |b|` exactly.
pub fn win_counts(a: &Die, b: &Die) -> (u64, u64, u64) {
    let mut wins = 0u64;
    let mut ties = 0u64;
    let mut losses = 0u64;
    for &fa in a.faces() {
        for &fb in b.faces() {
            match fa.cmp(&fb) {
                std::cmp::Ordering::Greater => wins += 1,
                std::cmp::Ordering::Equal => ties += 1,
                std::cmp::Ordering::Less => losses += 1,
            }
        }
    }
    (wins, ties, losses)
}

/// Probability that a roll of `a` strictly beats a roll of `b`. Ties count
/// for neither side.
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let (wins, _, _) = win_counts(a, b);
    wins as f64 / (a.faces().len() as f64 * b.faces().len() as f64)
}

/// Full pairwise win-probability matrix over a set of dice, including the
/// diagonal (a die against itself is close to, but usually not exactly, 0.5
/// because ties are excluded).
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityTable {
    cells: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    /// Compute the matrix. Built at most once per game start; the exhaustive
    /// comparison is quadratic in faces but the configs are tiny.
    pub fn build(dice: &[Die]) -> Self {
        let cells = dice
            .iter()
            .map(|row| dice.iter().map(|col| win_probability(row, col)).collect())
            .collect();
        Self { cells }
    }

    /// Number of dice the table was built over.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Probability that die `row` beats die `col`.
    pub fn probability(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(faces: &[u32]) -> Die {
        Die::new(faces.to_vec())
    }

    #[test]
    fn test_parse_dice_ok() {
        let dice = parse_dice(["2,2,4,4,9,9", "1,1,6,6,8,8"]).unwrap();
        assert_eq!(dice.len(), 2);
        assert_eq!(dice[0].faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(dice[1].sides(), 6);
    }

    #[test]
    fn test_parse_dice_tolerates_spaces() {
        let dice = parse_dice([" 1, 2 ,3 "]).unwrap();
        assert_eq!(dice[0].faces(), &[1, 2, 3]);
    }

    #[test]
    fn test_parse_dice_no_args() {
        let args: [&str; 0] = [];
        assert_eq!(parse_dice(args), Err(ConfigError::NoDice));
    }

    #[test]
    fn test_parse_dice_rejects_non_numeric() {
        assert_eq!(
            parse_dice(["1,2,x"]),
            Err(ConfigError::BadFace {
                index: 0,
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_dice_rejects_zero_and_negative() {
        assert_eq!(
            parse_dice(["1,0,2"]),
            Err(ConfigError::BadFace {
                index: 0,
                token: "0".to_string()
            })
        );
        assert_eq!(
            parse_dice(["3,4", "-1,5"]),
            Err(ConfigError::BadFace {
                index: 1,
                token: "-1".to_string()
            })
        );
    }

    #[test]
    fn test_parse_dice_rejects_empty_configuration() {
        assert_eq!(parse_dice(["1,2,3", "  "]), Err(ConfigError::EmptyDie { index: 1 }));
    }

    #[test]
    fn test_parse_dice_names_missing_token() {
        assert_eq!(
            parse_dice(["1,,2"]),
            Err(ConfigError::BadFace {
                index: 0,
                token: String::new()
            })
        );
    }

    #[test]
    fn test_win_probability_worked_example() {
        // 36 pairs, 20 favorable: 5/9.
        let a = die(&[2, 2, 4, 4, 9, 9]);
        let b = die(&[1, 1, 6, 6, 8, 8]);
        let (wins, ties, losses) = win_counts(&a, &b);

        assert_eq!((wins, ties, losses), (20, 0, 16));
        assert_eq!(win_probability(&a, &b), 5.0 / 9.0);
    }

    #[test]
    fn test_win_counts_sum_law() {
        let dice = [
            die(&[2, 2, 4, 4, 9, 9]),
            die(&[1, 1, 6, 6, 8, 8]),
            die(&[3, 3, 5, 5, 7, 7]),
            die(&[1]),
            die(&[4, 4, 4, 4]),
        ];
        for a in &dice {
            for b in &dice {
                let (wins, ties, losses) = win_counts(a, b);
                let total = a.faces().len() as u64 * b.faces().len() as u64;
                assert_eq!(wins + ties + losses, total);

                // Mirror symmetry: a's wins are b's losses.
                let (rwins, rties, rlosses) = win_counts(b, a);
                assert_eq!(wins, rlosses);
                assert_eq!(ties, rties);
                assert_eq!(losses, rwins);
            }
        }
    }

    #[test]
    fn test_self_play_excludes_ties() {
        // Against itself every die ties on equal faces, so the diagonal sits
        // strictly below 0.5 whenever any two faces are equal.
        let a = die(&[2, 2, 4, 4, 9, 9]);
        let (wins, ties, _) = win_counts(&a, &a);
        assert_eq!(ties, 12);
        assert_eq!(wins, 12);
        assert!(win_probability(&a, &a) < 0.5);
    }

    #[test]
    fn test_probability_table_shape() {
        let dice = [
            die(&[2, 2, 4, 4, 9, 9]),
            die(&[1, 1, 6, 6, 8, 8]),
            die(&[3, 3, 5, 5, 7, 7]),
        ];
        let table = ProbabilityTable::build(&dice);

        assert_eq!(table.size(), 3);
        assert_eq!(table.probability(0, 1), 5.0 / 9.0);
        assert_eq!(table.probability(1, 0), 4.0 / 9.0);
    }

    #[test]
    fn test_display_round_trips_argument_form() {
        let d = die(&[2, 2, 4, 4, 9, 9]);
        assert_eq!(d.to_string(), "2,2,4,4,9,9");
    }
}
