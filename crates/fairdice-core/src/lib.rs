//! Fairdice Core Library
//!
//! This crate provides the commit-reveal protocol, fair value derivation,
//! probability comparison engine and round logic for the provably fair dice
//! game. Console I/O lives in the `fairdice-cli` binary.

pub mod crypto;
pub mod dice;
pub mod fair;
pub mod protocol;
pub mod session;

pub use crypto::{
    keyed_digest, Commitment, Digest, EntropyError, EntropySource, OsEntropy, ScriptedEntropy,
    Secret, SessionKey,
};
pub use dice::{parse_dice, win_counts, win_probability, ConfigError, Die, ProbabilityTable};
pub use fair::{combine, derive_value};
pub use protocol::{RoundResult, ScoreBoard, Winner};
pub use session::{DrawOutcome, GameSession, PendingDraw};
