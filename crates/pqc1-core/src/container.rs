//! The `PQC1` container codec: framing, length fields, algorithm flags,
//! and strict bounds validation.

use crate::error::{Error, Result};

pub const MAGIC: [u8; 4] = *b"PQC1";

/// Fixed header length: magic(4) + flags(1) + 3 length words(12) + nonce(12).
pub const HEADER_LEN: usize = 4 + 1 + 4 + 4 + 4 + 12;

pub const TAG_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;

/// Algorithm flag bits. Bits 0 and 2 are mandatory on every valid
/// container; bit 1 is set iff a signature is present. No other bit may
/// ever be set.
pub mod flags {
    /// ML-KEM-768 key encapsulation.
    pub const KEM: u8 = 0x01;
    /// ML-DSA-87 signature present.
    pub const DSS: u8 = 0x02;
    /// AES-256-GCM symmetric cipher.
    pub const SYM: u8 = 0x04;
    /// Every bit this format currently understands.
    pub const KNOWN: u8 = KEM | DSS | SYM;
}

/// A decoded container: borrowed views into the original byte buffer plus
/// the handful of scalar header fields.
#[derive(Debug)]
pub struct Decoded<'a> {
    pub algorithm_flags: u8,
    pub nonce: [u8; NONCE_LEN],
    pub kem_ciphertext: &'a [u8],
    pub aead_tag: &'a [u8],
    pub signature: Option<&'a [u8]>,
    pub aead_ciphertext: &'a [u8],
}

impl Decoded<'_> {
    pub fn signature_present(&self) -> bool {
        self.algorithm_flags & flags::DSS != 0
    }
}

/// Encode a container. `signature` must be `Some` iff the DSS flag is set
/// in `algorithm_flags`; callers build `algorithm_flags` themselves so
/// this is checked with a debug assertion rather than a runtime error.
pub fn encode(
    algorithm_flags: u8,
    nonce: &[u8; NONCE_LEN],
    kem_ciphertext: &[u8],
    aead_tag: &[u8; TAG_LEN],
    signature: Option<&[u8]>,
    aead_ciphertext: &[u8],
) -> Vec<u8> {
    debug_assert_eq!(algorithm_flags & !flags::KNOWN, 0);
    debug_assert_eq!(
        signature.is_some(),
        algorithm_flags & flags::DSS != 0,
        "signature presence must match the DSS flag"
    );

    let sig_len = signature.map_or(0, |s| s.len());
    let mut out = Vec::with_capacity(
        HEADER_LEN + kem_ciphertext.len() + TAG_LEN + sig_len + aead_ciphertext.len(),
    );
    out.extend_from_slice(&MAGIC);
    out.push(algorithm_flags);
    out.extend_from_slice(&(kem_ciphertext.len() as u32).to_be_bytes());
    out.extend_from_slice(&(TAG_LEN as u32).to_be_bytes());
    out.extend_from_slice(&(sig_len as u32).to_be_bytes());
    out.extend_from_slice(nonce);
    out.extend_from_slice(kem_ciphertext);
    out.extend_from_slice(aead_tag);
    if let Some(sig) = signature {
        out.extend_from_slice(sig);
    }
    out.extend_from_slice(aead_ciphertext);
    out
}

/// Decode and strictly validate a container. Checks run in a fixed order
/// so that a given malformed input always fails with the same error kind.
pub fn decode(input: &[u8]) -> Result<Decoded<'_>> {
    if input.len() < HEADER_LEN {
        return Err(Error::Truncated("input shorter than fixed header"));
    }

    if input[0..4] != MAGIC {
        return Err(Error::BadMagic);
    }

    let algorithm_flags = input[4];
    if algorithm_flags & !flags::KNOWN != 0 {
        return Err(Error::UnsupportedAlgorithm(algorithm_flags));
    }
    if algorithm_flags & flags::KEM == 0 || algorithm_flags & flags::SYM == 0 {
        return Err(Error::UnsupportedAlgorithm(algorithm_flags));
    }

    let kem_ct_len = u32::from_be_bytes(input[5..9].try_into().unwrap()) as usize;
    let tag_len = u32::from_be_bytes(input[9..13].try_into().unwrap()) as usize;
    let sig_len = u32::from_be_bytes(input[13..17].try_into().unwrap()) as usize;
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&input[17..HEADER_LEN]);

    let remaining = input.len() - HEADER_LEN;
    let declared = kem_ct_len
        .checked_add(tag_len)
        .and_then(|v| v.checked_add(sig_len))
        .ok_or(Error::Truncated("declared lengths overflow"))?;
    if declared > remaining {
        return Err(Error::Truncated(
            "declared kem_ct_len + tag_len + sig_len exceeds remaining input",
        ));
    }

    if tag_len != TAG_LEN {
        return Err(Error::InvalidLength("tag_len must be 16"));
    }

    let dss_set = algorithm_flags & flags::DSS != 0;
    if (sig_len > 0) != dss_set {
        return Err(Error::InconsistentHeader(
            "sig_len must be nonzero iff the DSS flag is set",
        ));
    }

    let mut offset = HEADER_LEN;
    let kem_ciphertext = &input[offset..offset + kem_ct_len];
    offset += kem_ct_len;
    let aead_tag = &input[offset..offset + tag_len];
    offset += tag_len;
    let signature = if sig_len > 0 {
        let sig = &input[offset..offset + sig_len];
        offset += sig_len;
        Some(sig)
    } else {
        None
    };
    let aead_ciphertext = &input[offset..];

    Ok(Decoded {
        algorithm_flags,
        nonce,
        kem_ciphertext,
        aead_tag,
        signature,
        aead_ciphertext,
    })
}
