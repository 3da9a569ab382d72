//! Key-file convention and atomic output writes for the CLI front-end.
//!
//! None of this is part of the cryptographic core: it is the on-disk
//! layout convention a command-line tool needs to be usable, matching the
//! distilled original's `key_manager.py` naming scheme.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Four raw key blobs live under `key_dir/identity/`, named
/// `<identity>_{kem,dss}_{public,private}.key`. The core never sees a path,
/// only the bytes read from these files.
pub struct IdentityPaths {
    pub kem_public: PathBuf,
    pub kem_private: PathBuf,
    pub dss_public: PathBuf,
    pub dss_private: PathBuf,
}

impl IdentityPaths {
    pub fn new(key_dir: &Path, identity: &str) -> Self {
        let dir = key_dir.join(identity);
        IdentityPaths {
            kem_public: dir.join(format!("{identity}_kem_public.key")),
            kem_private: dir.join(format!("{identity}_kem_private.key")),
            dss_public: dir.join(format!("{identity}_dss_public.key")),
            dss_private: dir.join(format!("{identity}_dss_private.key")),
        }
    }
}

/// Write `bytes` to `path` atomically (temp file in the same directory,
/// then rename) with `0600` permissions, so a crash mid-write never leaves
/// a partial key or container file behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    std::io::Write::write_all(&mut tmp, bytes)?;
    tmp.as_file().sync_all()?;
    set_secure_permissions(tmp.path()).ok();
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persisting {}", path.display()))?;
    Ok(())
}

/// Read a raw key blob (or container) from disk.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Best-effort `0600` permissions; failures here never abort the caller.
pub fn set_secure_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
    }
    #[cfg(not(unix))]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_readonly(false);
        fs::set_permissions(path, perms)
    }
}
