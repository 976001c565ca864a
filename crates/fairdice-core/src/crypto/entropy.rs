//! Entropy source abstraction.
//!
//! The commit-reveal scheme is only as honest as its randomness: a
//! predictable secret lets the house bias every draw. Production code uses
//! the operating system CSPRNG; tests inject a scripted source so the whole
//! protocol becomes deterministic.

use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::VecDeque;
use thiserror::Error;

/// The secure random source is unavailable. Fatal: there is no fallback
/// that preserves the fairness guarantee.
#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct EntropyError(pub String);

/// Source of cryptographically strong random bytes.
///
/// Implementations can be:
/// - OsEntropy for production
/// - ScriptedEntropy for deterministic tests
pub trait EntropySource {
    /// Fill `dest` with random bytes, or fail if the source is unavailable.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating-system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

/// Deterministic source that replays a fixed sequence of byte blocks.
///
/// Each `fill` consumes one block; the block length must match the request.
/// Running out of blocks is reported as an entropy failure.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    blocks: VecDeque<Vec<u8>>,
}

impl ScriptedEntropy {
    /// Create a source that will serve the given blocks in order.
    pub fn new<I>(blocks: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Vec<u8>>,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
        }
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let block = self
            .blocks
            .pop_front()
            .ok_or_else(|| EntropyError("scripted entropy exhausted".to_string()))?;
        if block.len() != dest.len() {
            return Err(EntropyError(format!(
                "scripted block is {} bytes, {} requested",
                block.len(),
                dest.len()
            )));
        }
        dest.copy_from_slice(&block);
        Ok(())
    }
}
