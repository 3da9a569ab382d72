//! Command-line front-end for the `PQC1` hybrid post-quantum file
//! container. This binary owns all file I/O, argument parsing, and
//! human-readable diagnostics; `pqc1-core` never touches a path.

mod keyfile;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroizing;

use keyfile::IdentityPaths;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "PQC1: hybrid post-quantum file encryption (ML-KEM-768 + AES-256-GCM + optional ML-DSA-87)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an ML-KEM-768 keypair and an ML-DSA-87 keypair for an identity
    Keygen {
        /// Unique identifier for the identity (e.g. "alice")
        identity: String,
        /// Directory to store keys under (default: a per-user "pqc1/keys"
        /// directory resolved via the platform's config-dir convention)
        #[arg(long = "key-dir")]
        key_dir: Option<PathBuf>,
    },
    /// Encrypt a file for a recipient, optionally signed by a sender
    Encrypt {
        /// Path to the plaintext file to encrypt
        #[arg(long)]
        input: PathBuf,
        /// Path to write the PQC1 container to
        #[arg(long)]
        output: PathBuf,
        /// Recipient's ML-KEM-768 public key file
        #[arg(long = "recipient-pk")]
        recipient_pk: PathBuf,
        /// Sender's ML-DSA-87 private key file (optional; signs the container)
        #[arg(long = "signer-sk")]
        signer_sk: Option<PathBuf>,
    },
    /// Decrypt a PQC1 container, optionally verifying a sender's signature
    Decrypt {
        /// Path to the PQC1 container to decrypt
        #[arg(long)]
        input: PathBuf,
        /// Path to write the recovered plaintext to
        #[arg(long)]
        output: PathBuf,
        /// Recipient's ML-KEM-768 private key file
        #[arg(long = "recipient-sk")]
        recipient_sk: PathBuf,
        /// Sender's ML-DSA-87 public key file (optional; verifies a signature)
        #[arg(long = "signer-pk")]
        signer_pk: Option<PathBuf>,
        /// Reject files that are not signed, or whose signature cannot be verified
        #[arg(long = "require-signature")]
        require_signature: bool,
    },
}

fn main() {
    let _ = pqc1_core::security::disable_core_dumps();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Command::Keygen { identity, key_dir } => cmd_keygen(&identity, key_dir),
        Command::Encrypt {
            input,
            output,
            recipient_pk,
            signer_sk,
        } => cmd_encrypt(&input, &output, &recipient_pk, signer_sk.as_deref()),
        Command::Decrypt {
            input,
            output,
            recipient_sk,
            signer_pk,
            require_signature,
        } => cmd_decrypt(
            &input,
            &output,
            &recipient_sk,
            signer_pk.as_deref(),
            require_signature,
        ),
    }
}

/// Resolve the default key directory: `<config dir>/pqc1/keys`, falling
/// back to a relative `keys/` directory if the platform has no notion of a
/// per-user config directory. This convention is the front-end's business,
/// not the core's.
fn default_key_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pqc1").join("keys"))
        .unwrap_or_else(|| PathBuf::from("keys"))
}

fn cmd_keygen(identity: &str, key_dir: Option<PathBuf>) -> Result<()> {
    let key_dir = key_dir.unwrap_or_else(default_key_dir);
    let paths = IdentityPaths::new(&key_dir, identity);

    let (kem_pk, kem_sk) = pqc1_core::kem_keygen();
    let (dss_pk, dss_sk) = pqc1_core::dss_keygen();
    let kem_sk = Zeroizing::new(kem_sk);
    let dss_sk = Zeroizing::new(dss_sk);

    keyfile::write_atomic(&paths.kem_public, &kem_pk)?;
    keyfile::write_atomic(&paths.kem_private, &kem_sk)?;
    keyfile::write_atomic(&paths.dss_public, &dss_pk)?;
    keyfile::write_atomic(&paths.dss_private, &dss_sk)?;

    println!("[OK] Keys generated successfully for identity: {identity}");
    println!("  KEM Public Key:  {}", paths.kem_public.display());
    println!("  KEM Private Key: {}", paths.kem_private.display());
    println!("  DSS Public Key:  {}", paths.dss_public.display());
    println!("  DSS Private Key: {}", paths.dss_private.display());
    Ok(())
}

fn cmd_encrypt(
    input: &std::path::Path,
    output: &std::path::Path,
    recipient_pk: &std::path::Path,
    signer_sk: Option<&std::path::Path>,
) -> Result<()> {
    if !input.exists() {
        bail!("file not found: {}", input.display());
    }
    if !recipient_pk.exists() {
        bail!("recipient key not found: {}", recipient_pk.display());
    }
    if let Some(p) = signer_sk {
        if !p.exists() {
            bail!("signer key not found: {}", p.display());
        }
    }

    let plaintext = Zeroizing::new(keyfile::read_file(input)?);
    let recipient_pk_bytes = keyfile::read_file(recipient_pk)?;
    let signer_sk_bytes = signer_sk
        .map(keyfile::read_file)
        .transpose()?
        .map(Zeroizing::new);

    let container = pqc1_core::encrypt(&plaintext, &recipient_pk_bytes, signer_sk_bytes.as_deref())?;

    keyfile::write_atomic(output, &container)?;

    if signer_sk.is_some() {
        println!("[OK] Encrypted and signed -> {}", output.display());
    } else {
        println!("[OK] Encrypted -> {}", output.display());
    }
    Ok(())
}

fn cmd_decrypt(
    input: &std::path::Path,
    output: &std::path::Path,
    recipient_sk: &std::path::Path,
    signer_pk: Option<&std::path::Path>,
    require_signature: bool,
) -> Result<()> {
    if !input.exists() {
        bail!("encrypted file not found: {}", input.display());
    }
    if !recipient_sk.exists() {
        bail!("recipient key not found: {}", recipient_sk.display());
    }
    if let Some(p) = signer_pk {
        if !p.exists() {
            bail!("signer key not found: {}", p.display());
        }
    }

    let container = keyfile::read_file(input)?;
    let recipient_sk_bytes = Zeroizing::new(keyfile::read_file(recipient_sk)?);
    let signer_pk_bytes = signer_pk.map(keyfile::read_file).transpose()?;

    let decrypted = pqc1_core::decrypt(
        &container,
        &recipient_sk_bytes,
        signer_pk_bytes.as_deref(),
        require_signature,
    )?;

    keyfile::write_atomic(output, &decrypted.plaintext)?;

    use pqc1_core::SignatureStatus::*;
    match decrypted.signature_status {
        Verified => println!("[OK] Digital signature verified."),
        NotVerified => println!("[INFO] File is signed but no signer public key was provided."),
        NotPresent => println!("[INFO] File was not signed."),
    }
    println!("[OK] Decrypted -> {}", output.display());
    Ok(())
}
