//! SessionKey, Secret, Digest and Commitment for the commit-reveal scheme.

use super::entropy::{EntropyError, EntropySource};
use crate::fair::derive_value;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Per-session HMAC key. Owned exclusively by the house side; never
/// transmitted or printed.
#[derive(Clone)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    /// Generate a fresh session key from the given entropy source.
    pub fn generate(entropy: &mut dyn EntropySource) -> Result<Self, EntropyError> {
        let mut bytes = [0u8; 32];
        entropy.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never leak key material through Debug
        write!(f, "SessionKey(..)")
    }
}

/// Per-draw, single-use random value. Revealed only after the counterpart's
/// input has been accepted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret([u8; 32]);

impl Secret {
    /// Generate a fresh secret from the given entropy source.
    pub fn generate(entropy: &mut dyn EntropySource) -> Result<Self, EntropyError> {
        let mut bytes = [0u8; 32];
        entropy.fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Keyed digest of a secret: HMAC-SHA256(session key, secret). Publishable
/// before the secret is known.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Compute HMAC-SHA256(key, message).
pub fn keyed_digest(key: &SessionKey, message: &[u8]) -> Digest {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message);
    Digest(mac.finalize().into_bytes().into())
}

/// A single commit-reveal draw: the house binds itself to a secret before
/// the user supplies any input.
///
/// The digest is observable immediately; the secret only leaves the
/// commitment through [`Commitment::into_secret`], which consumes it, so a
/// commitment cannot serve two draws.
#[derive(Clone, Debug)]
pub struct Commitment {
    secret: Secret,
    digest: Digest,
    range: u32,
}

impl Commitment {
    /// Commit to a fresh random value for a draw over `[0, range)`.
    pub fn new(
        key: &SessionKey,
        range: u32,
        entropy: &mut dyn EntropySource,
    ) -> Result<Self, EntropyError> {
        assert!(range > 0, "draw range must be non-empty");
        let secret = Secret::generate(entropy)?;
        let digest = keyed_digest(key, secret.as_bytes());
        Ok(Self {
            secret,
            digest,
            range,
        })
    }

    /// The publishable digest.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Size of the committed draw's range.
    pub fn range(&self) -> u32 {
        self.range
    }

    /// The house's committed value: the **secret** reduced onto
    /// `[0, range)`. The published digest binds the house to it but must not
    /// determine it, otherwise the user could read the value off the digest
    /// before moving.
    pub fn house_value(&self) -> u32 {
        derive_value(self.secret.as_bytes(), self.range)
    }

    /// Recompute the digest from the secret and check it against the
    /// published one. False means the fairness claim for this draw is void.
    pub fn verify(&self, key: &SessionKey) -> bool {
        keyed_digest(key, self.secret.as_bytes()) == self.digest
    }

    /// Reveal the secret, consuming the commitment.
    pub fn into_secret(self) -> Secret {
        self.secret
    }
}
