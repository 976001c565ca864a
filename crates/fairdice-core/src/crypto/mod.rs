//! Cryptographic primitives for the fair dice protocol.
//!
//! This module provides:
//! - SessionKey, Secret and Digest for the commit-reveal scheme
//! - Commitment binding the house to a value before user input
//! - EntropySource abstraction over the secure random source

mod commitment;
mod entropy;

pub use commitment::{keyed_digest, Commitment, Digest, Secret, SessionKey};
pub use entropy::{EntropyError, EntropySource, OsEntropy, ScriptedEntropy};
