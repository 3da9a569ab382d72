//! Session key derivation: turns a KEM shared secret into a 32-byte
//! symmetric key.

use hkdf::Hkdf;
use secrecy::Secret;
use sha2::Sha256;

const HKDF_INFO: &[u8] = b"pqc-aes-key";

/// Derive the 32-byte AEAD key used for exactly one container.
///
/// If `shared_secret` is already at least 32 bytes, the first 32 bytes are
/// used verbatim (the common case for ML-KEM-768). Shorter secrets are
/// stretched with HKDF-SHA256 using an empty salt and `info = "pqc-aes-key"`.
/// Both branches are part of the wire contract and must not be changed
/// independently of each other.
pub fn derive_session_key(shared_secret: &[u8]) -> Secret<[u8; 32]> {
    let mut key = [0u8; 32];
    if shared_secret.len() >= 32 {
        key.copy_from_slice(&shared_secret[..32]);
    } else {
        let hk = Hkdf::<Sha256>::new(None, shared_secret);
        hk.expand(HKDF_INFO, &mut key)
            .expect("32 is a valid HKDF-SHA256 output length");
    }
    Secret::new(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn long_secret_is_truncated_verbatim() {
        let mut ss = vec![0u8; 40];
        for (i, b) in ss.iter_mut().enumerate() {
            *b = i as u8;
        }
        let key = derive_session_key(&ss);
        assert_eq!(key.expose_secret(), &ss[..32]);
    }

    #[test]
    fn exactly_32_bytes_is_taken_verbatim() {
        let ss = [7u8; 32];
        let key = derive_session_key(&ss);
        assert_eq!(key.expose_secret(), &ss);
    }

    #[test]
    fn short_secret_is_stretched_via_hkdf() {
        let ss = [1u8; 16];
        let key = derive_session_key(&ss);
        // Stretched output must not simply be the short secret padded with
        // zeroes, and must be deterministic for the same input.
        assert_ne!(&key.expose_secret()[..16], &ss[..]);
        let key2 = derive_session_key(&ss);
        assert_eq!(key.expose_secret(), key2.expose_secret());
    }

    #[test]
    fn different_short_secrets_derive_different_keys() {
        let a = derive_session_key(&[1u8; 16]);
        let b = derive_session_key(&[2u8; 16]);
        assert_ne!(a.expose_secret(), b.expose_secret());
    }
}
