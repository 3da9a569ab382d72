use thiserror::Error;

/// Typed failure surface for every fallible core operation.
///
/// No variant here carries enough detail to let a caller distinguish
/// "wrong key" from "corrupted/tampered data" for `DecryptionFailed` or
/// `SignatureInvalid` — that distinction is deliberately not made.
#[derive(Debug, Error)]
pub enum Error {
    #[error("truncated container: {0}")]
    Truncated(&'static str),

    #[error("bad magic bytes, expected \"PQC1\"")]
    BadMagic,

    #[error("invalid length field: {0}")]
    InvalidLength(&'static str),

    #[error("inconsistent header: {0}")]
    InconsistentHeader(&'static str),

    #[error("unsupported algorithm flags: {0:#04x}")]
    UnsupportedAlgorithm(u8),

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("signature required but not present")]
    SignatureRequired,

    #[error("signature present but no signer public key provided")]
    MissingSignerKey,

    #[error("signature verification failed")]
    SignatureInvalid,

    #[error("primitive operation failed: {0}")]
    PrimitiveFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
