//! Uniform surface over the underlying post-quantum primitive library.
//!
//! This is the only module that names `pqcrypto_mlkem`/`pqcrypto_mldsa` types.
//! Every other component deals exclusively in `Vec<u8>` blobs, so swapping the
//! primitive library is a one-module change.

use crate::error::{Error, Result};

#[cfg(feature = "pq")]
use pqcrypto_mlkem::mlkem768;
#[cfg(feature = "pq")]
use pqcrypto_mldsa::mldsa87;
#[cfg(feature = "pq")]
use pqcrypto_traits::kem::{
    Ciphertext as _, PublicKey as KemPublicKeyTrait, SecretKey as KemSecretKeyTrait,
    SharedSecret as _,
};
#[cfg(feature = "pq")]
use pqcrypto_traits::sign::{
    DetachedSignature as _, PublicKey as DssPublicKeyTrait, SecretKey as DssSecretKeyTrait,
};

/// Generate a fresh ML-KEM-768 keypair; returns `(public_key, private_key)` bytes.
#[cfg(feature = "pq")]
pub fn kem_keygen() -> (Vec<u8>, Vec<u8>) {
    let (pk, sk) = mlkem768::keypair();
    (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
}

/// Encapsulate against a recipient's ML-KEM-768 public key.
/// Returns `(kem_ciphertext, shared_secret)`.
#[cfg(feature = "pq")]
pub fn kem_encapsulate(public_key: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    let pk = mlkem768::PublicKey::from_bytes(public_key)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-KEM-768 public key".into()))?;
    let (shared_secret, ciphertext) = mlkem768::encapsulate(&pk);
    Ok((
        ciphertext.as_bytes().to_vec(),
        shared_secret.as_bytes().to_vec(),
    ))
}

/// Decapsulate a KEM ciphertext with a recipient's private key.
///
/// ML-KEM-768 never raises on a semantically-wrong-but-well-formed
/// ciphertext; it returns an implicit-rejection shared secret instead. This
/// function only fails when `ciphertext` cannot be parsed as a ciphertext of
/// the expected length — that failure is a genuine `PrimitiveFailure`, not a
/// decryption failure (the AEAD tag check downstream is what actually
/// detects a wrong key).
#[cfg(feature = "pq")]
pub fn kem_decapsulate(private_key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let sk = mlkem768::SecretKey::from_bytes(private_key)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-KEM-768 private key".into()))?;
    let ct = mlkem768::Ciphertext::from_bytes(ciphertext)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-KEM-768 ciphertext".into()))?;
    let shared_secret = mlkem768::decapsulate(&ct, &sk);
    Ok(shared_secret.as_bytes().to_vec())
}

/// Generate a fresh ML-DSA-87 keypair; returns `(public_key, private_key)` bytes.
#[cfg(feature = "pq")]
pub fn dss_keygen() -> (Vec<u8>, Vec<u8>) {
    let (pk, sk) = mldsa87::keypair();
    (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
}

/// Produce a detached ML-DSA-87 signature over `message`.
#[cfg(feature = "pq")]
pub fn dss_sign(private_key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let sk = mldsa87::SecretKey::from_bytes(private_key)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-DSA-87 private key".into()))?;
    let sig = mldsa87::detached_sign(message, &sk);
    Ok(sig.as_bytes().to_vec())
}

/// Verify a detached ML-DSA-87 signature. Returns `Ok(false)` (never an
/// error) for a syntactically valid but mathematically wrong signature;
/// only malformed key/signature bytes produce `Err`.
#[cfg(feature = "pq")]
pub fn dss_verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let pk = mldsa87::PublicKey::from_bytes(public_key)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-DSA-87 public key".into()))?;
    let sig = mldsa87::DetachedSignature::from_bytes(signature)
        .map_err(|_| Error::PrimitiveFailure("invalid ML-DSA-87 signature encoding".into()))?;
    Ok(mldsa87::verify_detached_signature(&sig, message, &pk).is_ok())
}
