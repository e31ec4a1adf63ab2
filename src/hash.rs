//! Content hashing for chain-of-custody identification
//!
//! Two independent digests are computed over the full buffer so a report can
//! be matched against an evidence inventory regardless of which algorithm
//! the other side recorded.

use sha2::{Digest, Sha256};

/// Computes lowercase hex MD5 and SHA-256 digests of the buffer.
/// Pure function of the bytes; the filename never participates.
pub fn digests(data: &[u8]) -> (String, String) {
    let md5 = format!("{:x}", md5::compute(data));
    let mut hasher = Sha256::new();
    hasher.update(data);
    let sha256 = hex::encode(hasher.finalize());
    (md5, sha256)
}
