//! Fair value derivation.
//!
//! Maps the house's secret onto a bounded integer range and combines it with
//! a user-supplied value so neither party controls the final outcome: the
//! house's contribution is fixed (committed via its keyed digest) before the
//! user acts, and the user's contribution is fixed before the secret is
//! revealed.

/// Reduce a byte string onto `[0, range)`.
///
/// The input is the house's **secret**, never the published digest: the
/// digest is public before the user moves, so anything derived from it is
/// predictable by the user. The full byte string is treated as a big-endian
/// unsigned integer and reduced with Horner's rule; truncating to the low
/// bits would bias ranges that are not powers of two.
pub fn derive_value(bytes: &[u8], range: u32) -> u32 {
    assert!(range > 0, "draw range must be non-empty");
    let m = u64::from(range);
    let mut acc: u64 = 0;
    for &byte in bytes {
        acc = (acc * 256 + u64::from(byte)) % m;
    }
    acc as u32
}

/// Combine the house's committed value with the user's value over `[0, range)`.
///
/// For a fixed house value this is a bijection in the user value (and vice
/// versa), so a uniform contribution from either side makes the result
/// uniform.
pub fn combine(house: u32, user: u32, range: u32) -> u32 {
    assert!(range > 0, "draw range must be non-empty");
    ((u64::from(house) + u64::from(user)) % u64::from(range)) as u32
}
