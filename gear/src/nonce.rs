//! Request nonces.
//!
//! Outbound requests are bound to the wall-clock second in which they are
//! signed. The same integer is hashed into the signature and sent in the
//! `X-Nonce` header.

use std::fmt::{Display, Formatter};
use std::time::SystemTime;

/// A Unix timestamp, in whole seconds, used as a request nonce.
///
/// Two requests signed within the same second carry the same nonce; the
/// gateway tolerates repeats within its window.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Nonce(u64);

impl Nonce {
    /// Creates a nonce from a raw seconds value.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a nonce.
    ///
    /// A clock set before the Unix epoch yields `0`.
    #[must_use]
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(secs)
    }

    /// Returns the nonce as seconds since the Unix epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Nonce {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_display_is_plain_integer() {
        assert_eq!(Nonce::from_secs(1_700_000_000).to_string(), "1700000000");
    }

    #[test]
    fn test_nonce_now_is_recent() {
        // 2023-11-14, well before any test run
        assert!(Nonce::now().as_secs() > 1_700_000_000);
    }
}
