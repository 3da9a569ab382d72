//! Core cryptographic library for the `PQC1` hybrid post-quantum file
//! container: ML-KEM-768 key encapsulation, AES-256-GCM for confidentiality
//! and integrity, and an optional ML-DSA-87 signature over the container
//! header and ciphertext.
//!
//! This crate does no file I/O and owns no process-wide state; front-ends
//! (CLI, service, embedder) read bytes in, call [`encrypt`]/[`decrypt`],
//! and write bytes out.

mod container;
mod error;
mod kdf;
mod pipeline;
mod primitive;
pub mod security;
mod signature;

pub use container::{flags, HEADER_LEN, MAGIC, NONCE_LEN, TAG_LEN};
pub use error::{Error, Result};
pub use pipeline::{decrypt, encrypt, Decrypted, SignatureStatus};

#[cfg(feature = "pq")]
pub use primitive::{dss_keygen, dss_sign, dss_verify, kem_decapsulate, kem_encapsulate, kem_keygen};
