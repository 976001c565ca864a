//! Game session: key, dice, scoreboard and the commit/input/reveal/verify
//! sequence each draw goes through.
//!
//! The fairness ordering is enforced by the types: [`PendingDraw`] exposes
//! only the publishable digest, and the secret, house value and combined
//! outcome become available only through [`GameSession::finish_draw`], which
//! consumes the pending draw together with the user's input. A commitment
//! can therefore never serve two draws, and a secret is never observable
//! before the user's input has been supplied.

use crate::crypto::{Commitment, Digest, EntropyError, EntropySource, Secret, SessionKey};
use crate::dice::Die;
use crate::fair::combine;
use crate::protocol::{RoundResult, ScoreBoard, Winner};

/// One in-flight commit-reveal draw. Only the digest is observable.
#[derive(Debug)]
pub struct PendingDraw {
    commitment: Commitment,
}

impl PendingDraw {
    /// The digest to publish before accepting any user input.
    pub fn digest(&self) -> &Digest {
        self.commitment.digest()
    }

    /// Size of the committed range.
    pub fn range(&self) -> u32 {
        self.commitment.range()
    }
}

/// A completed draw: everything needed to report and prove the outcome.
#[derive(Debug)]
pub struct DrawOutcome {
    /// The digest that was published before the user's input.
    pub digest: Digest,
    /// The revealed secret behind the digest.
    pub secret: Secret,
    /// The house's committed value, derived from the secret.
    pub house_value: u32,
    /// The user's contribution.
    pub user_value: u32,
    /// `(house_value + user_value) mod range`.
    pub combined: u32,
    /// Whether the revealed secret reproduces the published digest.
    pub verified: bool,
}

/// Session state for one game: the house's key, the configured dice, the
/// entropy source and the cumulative score. Passed explicitly through every
/// step; there is no ambient state.
pub struct GameSession<E: EntropySource> {
    key: SessionKey,
    entropy: E,
    dice: Vec<Die>,
    scores: ScoreBoard,
}

impl<E: EntropySource> GameSession<E> {
    /// Create a session, generating a fresh session key from `entropy`.
    pub fn new(dice: Vec<Die>, mut entropy: E) -> Result<Self, EntropyError> {
        assert!(!dice.is_empty(), "a session needs at least one die");
        let key = SessionKey::generate(&mut entropy)?;
        Ok(Self {
            key,
            entropy,
            dice,
            scores: ScoreBoard::default(),
        })
    }

    /// The configured dice, in startup order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Current cumulative score.
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Commit to a fresh draw over `[0, range)`. The returned pending draw's
    /// digest must be shown to the user before their input is accepted.
    pub fn begin_draw(&mut self, range: u32) -> Result<PendingDraw, EntropyError> {
        let commitment = Commitment::new(&self.key, range, &mut self.entropy)?;
        Ok(PendingDraw { commitment })
    }

    /// Accept the user's input, reveal the secret and verify the commitment.
    ///
    /// `user_value` must already be validated against the draw's range by
    /// the caller's prompt loop.
    pub fn finish_draw(&self, draw: PendingDraw, user_value: u32) -> DrawOutcome {
        let range = draw.commitment.range();
        debug_assert!(user_value < range, "user value outside committed range");
        let digest = *draw.commitment.digest();
        let house_value = draw.commitment.house_value();
        let verified = draw.commitment.verify(&self.key);
        let secret = draw.commitment.into_secret();
        DrawOutcome {
            digest,
            secret,
            house_value,
            user_value,
            combined: combine(house_value, user_value, range),
            verified,
        }
    }

    /// The die the house takes: the lowest index not already taken. With a
    /// single configured die both sides roll the same die.
    pub fn house_die_choice(&self, taken: Option<usize>) -> usize {
        (0..self.dice.len())
            .find(|&i| Some(i) != taken)
            .unwrap_or(0)
    }

    /// Compare the two face values, credit the scoreboard and emit the
    /// round's result. Malformed input never reaches this point, so this is
    /// the only place the score changes.
    pub fn resolve(&mut self, user_face: u32, house_face: u32, verified: bool) -> RoundResult {
        let winner = match user_face.cmp(&house_face) {
            std::cmp::Ordering::Greater => Winner::User,
            std::cmp::Ordering::Less => Winner::House,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        self.scores.record(winner);
        RoundResult {
            user_face,
            house_face,
            winner,
            verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ScriptedEntropy;
    use crate::dice::parse_dice;

    fn session_with(blocks: &[[u8; 32]]) -> GameSession<ScriptedEntropy> {
        let dice = parse_dice(["2,2,4,4,9,9", "1,1,6,6,8,8"]).unwrap();
        GameSession::new(dice, ScriptedEntropy::new(blocks.to_vec())).unwrap()
    }

    #[test]
    fn test_draw_round_trip_verifies() {
        let mut session = session_with(&[[9u8; 32], [1u8; 32]]);
        let draw = session.begin_draw(6).unwrap();
        let digest = *draw.digest();

        let outcome = session.finish_draw(draw, 3);
        assert!(outcome.verified);
        assert_eq!(outcome.digest, digest);
        assert_eq!(outcome.user_value, 3);
        assert!(outcome.house_value < 6);
        assert_eq!(outcome.combined, (outcome.house_value + 3) % 6);
    }

    #[test]
    fn test_draws_use_fresh_secrets() {
        let mut session = session_with(&[[9u8; 32], [1u8; 32], [2u8; 32]]);
        let first = session.begin_draw(6).unwrap();
        let second = session.begin_draw(6).unwrap();

        assert_ne!(first.digest(), second.digest());
        let first = session.finish_draw(first, 0);
        let second = session.finish_draw(second, 0);
        assert_ne!(first.secret, second.secret);
    }

    #[test]
    fn test_entropy_exhaustion_is_fatal() {
        let mut session = session_with(&[[9u8; 32]]);
        assert!(session.begin_draw(6).is_err());
    }

    #[test]
    fn test_resolve_updates_exactly_one_side() {
        let mut session = session_with(&[[9u8; 32]]);

        let result = session.resolve(9, 6, true);
        assert_eq!(result.winner, Winner::User);
        assert_eq!(*session.scores(), ScoreBoard { user_wins: 1, house_wins: 0 });

        let result = session.resolve(2, 8, true);
        assert_eq!(result.winner, Winner::House);
        assert_eq!(*session.scores(), ScoreBoard { user_wins: 1, house_wins: 1 });
    }

    #[test]
    fn test_resolve_tie_leaves_score_untouched() {
        let mut session = session_with(&[[9u8; 32]]);
        let result = session.resolve(4, 4, true);

        assert_eq!(result.winner, Winner::Tie);
        assert_eq!(*session.scores(), ScoreBoard::default());
    }

    #[test]
    fn test_unverified_flag_propagates() {
        let mut session = session_with(&[[9u8; 32]]);
        let result = session.resolve(9, 1, false);
        assert!(!result.verified);
        // The flagged result still counts.
        assert_eq!(session.scores().user_wins, 1);
    }

    #[test]
    fn test_house_die_choice_avoids_taken_die() {
        let session = session_with(&[[9u8; 32]]);
        assert_eq!(session.house_die_choice(None), 0);
        assert_eq!(session.house_die_choice(Some(0)), 1);
        assert_eq!(session.house_die_choice(Some(1)), 0);
    }

    #[test]
    fn test_house_die_choice_single_die_is_shared() {
        let dice = parse_dice(["1,2,3"]).unwrap();
        let session = GameSession::new(dice, ScriptedEntropy::new([[9u8; 32]])).unwrap();
        assert_eq!(session.house_die_choice(Some(0)), 0);
    }
}
