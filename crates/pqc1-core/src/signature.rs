//! Signature payload construction.
//!
//! The bytes that get signed/verified are *not* a slice of the container —
//! they are rebuilt from parsed header fields every time, on both the sign
//! and the verify path, and deliberately omit `sig_len` (a signature cannot
//! cover its own length). Building this from anything other than parsed
//! fields is the single easiest way to get this format subtly wrong.

use crate::container::NONCE_LEN;

/// Reconstruct the exact byte sequence that gets ML-DSA-87 signed:
/// `flags(1) || kem_ct_len(4, BE) || tag_len(4, BE) || nonce(12) ||
/// kem_ciphertext || aead_tag || aead_ciphertext`.
pub fn build_payload(
    algorithm_flags: u8,
    nonce: &[u8; NONCE_LEN],
    kem_ciphertext: &[u8],
    aead_tag: &[u8],
    aead_ciphertext: &[u8],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        1 + 4 + 4 + NONCE_LEN + kem_ciphertext.len() + aead_tag.len() + aead_ciphertext.len(),
    );
    out.push(algorithm_flags);
    out.extend_from_slice(&(kem_ciphertext.len() as u32).to_be_bytes());
    out.extend_from_slice(&(aead_tag.len() as u32).to_be_bytes());
    out.extend_from_slice(nonce);
    out.extend_from_slice(kem_ciphertext);
    out.extend_from_slice(aead_tag);
    out.extend_from_slice(aead_ciphertext);
    out
}
