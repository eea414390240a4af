//! Credential value object - the stored password of a user.
//!
//! The value is opaque to this service: it is written on create and update
//! and read back only by the store. It has no `Serialize` impl and its
//! `Debug` output is redacted, so it cannot reach a response body or a log line.

/// Opaque stored credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
}

// Don't expose the secret in debug output
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Credential {
    /// Wrap a credential received from a caller or loaded from the store.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Get the credential for storage.
    pub fn expose(&self) -> &str {
        &self.secret
    }

    /// Consume and return the credential for storage.
    pub fn into_inner(self) -> String {
        self.secret
    }
}
