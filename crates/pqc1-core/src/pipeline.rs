//! Hybrid pipeline: orchestrates the primitive adapter, session key
//! derivation, and container codec into the two public operations this
//! crate exists to provide.

use aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use rand_core::RngCore;
use secrecy::ExposeSecret;

use crate::container::{self, flags, Decoded, NONCE_LEN, TAG_LEN};
use crate::error::{Error, Result};
use crate::kdf::derive_session_key;
use crate::primitive;
use crate::signature;

/// Outcome of the signature policy check on decrypt: `false` meaning "not
/// verified" must be distinguishable from `false` meaning "verification
/// failed", so this is an enum rather than a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStatus {
    /// No DSS bit set; the container was never signed.
    NotPresent,
    /// A signature is present but no signer public key was supplied, and
    /// policy did not require one. The signature was not checked.
    NotVerified,
    /// A signature is present, a signer public key was supplied, and
    /// cryptographic verification succeeded.
    Verified,
}

/// Plaintext plus the decode-time metadata the caller needs to judge trust.
#[derive(Debug)]
pub struct Decrypted {
    pub plaintext: Vec<u8>,
    pub signature_status: SignatureStatus,
}

/// Encrypt `plaintext` for `recipient_kem_public`, optionally signing the
/// container with `signer_dss_private`. Returns the finished `PQC1`
/// container bytes.
pub fn encrypt(
    plaintext: &[u8],
    recipient_kem_public: &[u8],
    signer_dss_private: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let (kem_ciphertext, shared_secret) = primitive::kem_encapsulate(recipient_kem_public)?;
    let key = derive_session_key(&shared_secret);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key.expose_secret())
        .map_err(|e| Error::PrimitiveFailure(format!("invalid AES-256-GCM key: {e}")))?;
    let nonce = Nonce::from_slice(&nonce_bytes);
    let combined = cipher
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: &[],
            },
        )
        .map_err(|e| Error::PrimitiveFailure(format!("AES-256-GCM encrypt failed: {e}")))?;

    let split_at = combined.len() - TAG_LEN;
    let aead_ciphertext = &combined[..split_at];
    let mut aead_tag = [0u8; TAG_LEN];
    aead_tag.copy_from_slice(&combined[split_at..]);

    let mut algorithm_flags = flags::KEM | flags::SYM;
    let signature = if let Some(signer_sk) = signer_dss_private {
        algorithm_flags |= flags::DSS;
        let payload = signature::build_payload(
            algorithm_flags,
            &nonce_bytes,
            &kem_ciphertext,
            &aead_tag,
            aead_ciphertext,
        );
        Some(primitive::dss_sign(signer_sk, &payload)?)
    } else {
        None
    };

    Ok(container::encode(
        algorithm_flags,
        &nonce_bytes,
        &kem_ciphertext,
        &aead_tag,
        signature.as_deref(),
        aead_ciphertext,
    ))
}

/// Decrypt a `PQC1` container, applying the signature policy below before
/// doing any KEM or AEAD work.
///
/// `signer_dss_public` is the sender's public key, used only to verify an
/// embedded signature. `require_signature` enforces that a verified
/// signature is present. Decision table:
///
/// | signature present | signer key given | require_signature | result |
/// |---|---|---|---|
/// | no  | -   | no  | succeeds, `NotPresent` |
/// | no  | -   | yes | `SignatureRequired` |
/// | yes | no  | no  | succeeds, `NotVerified` |
/// | yes | no  | yes | `MissingSignerKey` |
/// | yes | yes | any | verified -> `Verified`, else `SignatureInvalid` |
pub fn decrypt(
    container: &[u8],
    recipient_kem_private: &[u8],
    signer_dss_public: Option<&[u8]>,
    require_signature: bool,
) -> Result<Decrypted> {
    let decoded = container::decode(container)?;
    let signature_present = decoded.signature_present();

    let signature_status = match (signature_present, signer_dss_public, require_signature) {
        (false, _, false) => SignatureStatus::NotPresent,
        (false, _, true) => return Err(Error::SignatureRequired),
        (true, None, false) => SignatureStatus::NotVerified,
        (true, None, true) => return Err(Error::MissingSignerKey),
        (true, Some(pk), _) => {
            verify_signature(&decoded, pk)?;
            SignatureStatus::Verified
        }
    };

    let shared_secret = primitive::kem_decapsulate(recipient_kem_private, decoded.kem_ciphertext)?;
    let key = derive_session_key(&shared_secret);

    let cipher = Aes256Gcm::new_from_slice(key.expose_secret())
        .map_err(|e| Error::PrimitiveFailure(format!("invalid AES-256-GCM key: {e}")))?;
    let nonce = Nonce::from_slice(&decoded.nonce);

    let mut combined = Vec::with_capacity(decoded.aead_ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(decoded.aead_ciphertext);
    combined.extend_from_slice(decoded.aead_tag);

    let plaintext = cipher
        .decrypt(
            nonce,
            Payload {
                msg: &combined,
                aad: &[],
            },
        )
        .map_err(|_| Error::DecryptionFailed)?;

    Ok(Decrypted {
        plaintext,
        signature_status,
    })
}

fn verify_signature(decoded: &Decoded<'_>, signer_dss_public: &[u8]) -> Result<()> {
    let signature = decoded.signature.expect("caller only verifies when present");
    let payload = signature::build_payload(
        decoded.algorithm_flags,
        &decoded.nonce,
        decoded.kem_ciphertext,
        decoded.aead_tag,
        decoded.aead_ciphertext,
    );
    if primitive::dss_verify(signer_dss_public, &payload, signature)? {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

#[cfg(all(test, feature = "pq"))]
mod tests {
    use super::*;
    use crate::primitive::{dss_keygen, kem_keygen};

    #[test]
    fn round_trip_without_signature() {
        let (pk, sk) = kem_keygen();
        let plaintext = b"hello world\n";
        let container = encrypt(plaintext, &pk, None).unwrap();
        let decrypted = decrypt(&container, &sk, None, false).unwrap();
        assert_eq!(decrypted.plaintext, plaintext);
        assert_eq!(decrypted.signature_status, SignatureStatus::NotPresent);
    }

    #[test]
    fn signed_round_trip_verifies() {
        let (pk_r, sk_r) = kem_keygen();
        let (pk_s, sk_s) = dss_keygen();
        let plaintext = vec![0xAAu8; 4096];
        let container = encrypt(&plaintext, &pk_r, Some(&sk_s)).unwrap();
        let decrypted = decrypt(&container, &sk_r, Some(&pk_s), false).unwrap();
        assert_eq!(decrypted.plaintext, plaintext);
        assert_eq!(decrypted.signature_status, SignatureStatus::Verified);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let (pk, sk) = kem_keygen();
        let container = encrypt(b"", &pk, None).unwrap();
        let decrypted = decrypt(&container, &sk, None, false).unwrap();
        assert!(decrypted.plaintext.is_empty());
    }

    #[test]
    fn tampering_with_ciphertext_fails_decryption() {
        let (pk, sk) = kem_keygen();
        let mut container = encrypt(b"top secret contents", &pk, None).unwrap();
        let last = container.len() - 1;
        container[last] ^= 0x01;
        assert!(matches!(
            decrypt(&container, &sk, None, false).unwrap_err(),
            Error::DecryptionFailed
        ));
    }

    #[test]
    fn tampering_with_tag_fails_decryption() {
        let (pk, sk) = kem_keygen();
        let container = encrypt(b"another message", &pk, None).unwrap();
        let decoded = container::decode(&container).unwrap();
        let tag_start = container.len() - decoded.aead_ciphertext.len() - TAG_LEN;
        let mut tampered = container.clone();
        tampered[tag_start] ^= 0x01;
        assert!(matches!(
            decrypt(&tampered, &sk, None, false).unwrap_err(),
            Error::DecryptionFailed
        ));
    }

    #[test]
    fn wrong_recipient_key_fails() {
        let (pk, _sk) = kem_keygen();
        let (_pk2, sk2) = kem_keygen();
        let container = encrypt(b"for someone else", &pk, None).unwrap();
        assert!(matches!(
            decrypt(&container, &sk2, None, false).unwrap_err(),
            Error::DecryptionFailed
        ));
    }

    #[test]
    fn signature_tamper_is_caught_before_aead_decrypt() {
        let (pk_r, sk_r) = kem_keygen();
        let (pk_s, sk_s) = dss_keygen();
        let mut container = encrypt(b"signed content", &pk_r, Some(&sk_s)).unwrap();
        let last = container.len() - 1;
        container[last] ^= 0x01;
        assert!(matches!(
            decrypt(&container, &sk_r, Some(&pk_s), false).unwrap_err(),
            Error::SignatureInvalid
        ));
    }

    #[test]
    fn require_signature_rejects_unsigned_container() {
        let (pk, sk) = kem_keygen();
        let container = encrypt(b"plain", &pk, None).unwrap();
        assert!(matches!(
            decrypt(&container, &sk, None, true).unwrap_err(),
            Error::SignatureRequired
        ));
    }

    #[test]
    fn require_signature_without_verifier_key_fails() {
        let (pk_r, sk_r) = kem_keygen();
        let (_pk_s, sk_s) = dss_keygen();
        let container = encrypt(b"signed but unverifiable", &pk_r, Some(&sk_s)).unwrap();
        assert!(matches!(
            decrypt(&container, &sk_r, None, true).unwrap_err(),
            Error::MissingSignerKey
        ));
    }

    #[test]
    fn signed_without_verifier_key_succeeds_but_unverified() {
        let (pk_r, sk_r) = kem_keygen();
        let (_pk_s, sk_s) = dss_keygen();
        let plaintext = b"warn but continue";
        let container = encrypt(plaintext, &pk_r, Some(&sk_s)).unwrap();
        let decrypted = decrypt(&container, &sk_r, None, false).unwrap();
        assert_eq!(decrypted.plaintext, plaintext);
        assert_eq!(decrypted.signature_status, SignatureStatus::NotVerified);
    }

    #[test]
    fn successive_encryptions_are_not_identical() {
        let (pk, _sk) = kem_keygen();
        let a = encrypt(b"same plaintext", &pk, None).unwrap();
        let b = encrypt(b"same plaintext", &pk, None).unwrap();
        assert_ne!(a, b);
    }
}
