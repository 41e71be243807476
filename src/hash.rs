//! Hashing for the HLL sketch
//!
//! Any well-mixing 64-bit hash is acceptable as long as it is used
//! consistently, so this crate uses `XxHash64` rather than a cryptographic
//! hash, since the sketch hashes on every insertion and has no need for
//! collision resistance.

use std::hash::Hasher;
use twox_hash::XxHash64;

/// Seed used for all sketch hashing in this crate. Fixed so that test
/// fixtures and accuracy benchmarks are reproducible across runs.
pub const SEED: u64 = 0x5ee_d5ee_d5ee_d5ee;

/// Hashes an opaque byte sequence to a uniform 64-bit value.
pub fn hash64(data: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    hasher.write(data);
    hasher.finish()
}
