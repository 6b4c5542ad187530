//! Stable content hash shared by every pseudonym generator
//!
//! The hash must be identical across runs, processes and platforms, so it is
//! derived from SHA-256 rather than the randomly seeded `std` hasher.

use sha2::{Digest, Sha256};

/// Hash a string to a `u32`: the first four bytes (big-endian) of its SHA-256 digest
pub fn stable_hash(value: &str) -> u32 {
    let digest = Sha256::digest(value.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}
