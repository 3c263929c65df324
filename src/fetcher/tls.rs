//! Process-wide opt-out of certificate verification.

use std::sync::Once;

use reqwest::ClientBuilder;

static INSECURE_INIT: Once = Once::new();

/// Proof that insecure mode was switched on for this process.
///
/// Only [`allow_insecure`] hands these out, so a client that skips
/// certificate checks cannot be built by accident.
#[derive(Debug, Clone, Copy)]
pub struct InsecureTls {
    _private: (),
}

impl InsecureTls {
    pub(crate) fn apply(self, builder: ClientBuilder) -> ClientBuilder {
        builder.danger_accept_invalid_certs(true)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TlsMode {
    Verify,
    Insecure(InsecureTls),
}

/// Switch the process into insecure mode. Idempotent; the notice is logged once.
pub fn allow_insecure() -> InsecureTls {
    INSECURE_INIT.call_once(|| {
        tracing::debug!("TLS certificate verification disabled for this process");
    });
    InsecureTls { _private: () }
}

impl TlsMode {
    /// Runs the one-time insecure initialization when `verify` is false.
    pub fn init(verify: bool) -> Self {
        if verify {
            Self::Verify
        } else {
            Self::Insecure(allow_insecure())
        }
    }
}
