//! Best-effort process hardening. None of this is part of the
//! cryptographic contract; failures here are swallowed by the caller, not
//! surfaced as `crate::error::Error`.

/// Disable core dumps for the current process, so a crash never leaves
/// key material or plaintext lying around in a core file.
pub fn disable_core_dumps() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use libc::{rlimit, setrlimit, RLIMIT_CORE};
        let rlim = rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        let result = unsafe { setrlimit(RLIMIT_CORE, &rlim) };
        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
    #[cfg(not(unix))]
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabling_core_dumps_does_not_panic() {
        let _ = disable_core_dumps();
    }
}
