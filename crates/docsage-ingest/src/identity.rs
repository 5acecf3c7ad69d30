//! Deterministic document identity.

use sha2::{Digest, Sha256};

/// Hex characters of the content digest kept in the id.
const HASH_PREFIX_LEN: usize = 8;

/// `"{filename}_{hash_prefix}"` over the raw upload bytes.
///
/// Not a security hash; only stability across identical uploads matters.
pub fn identify(filename: &str, content: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(content));
    format!("{}_{}", filename, &digest[..HASH_PREFIX_LEN])
}
