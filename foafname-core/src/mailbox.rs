//! Mailbox identifiers
//!
//! FOAF publishes `foaf:mbox_sha1sum`, the SHA-1 of a person's `mailto:`
//! URI, so that profiles can be matched without exposing the address.

use regex::Regex;
use sha1::{Digest, Sha1};
use std::fmt;
use std::sync::LazyLock;

use crate::MAILTO_PREFIX;

static SHA1_HEX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-fA-F0-9]{40}$").unwrap()
});

/// Hex-encoded SHA-1 of a `mailto:` URI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MailboxId(String);

impl MailboxId {
    /// Hash a bare email address.
    ///
    /// # Panics
    ///
    /// Panics if `email` already carries the `mailto:` prefix. Callers pass
    /// the address as typed by the user; a prefixed value is a bug upstream.
    pub fn from_email(email: &str) -> Self {
        assert!(
            !email.starts_with(MAILTO_PREFIX),
            "email must not carry the {MAILTO_PREFIX} prefix: {email}"
        );

        let mut hasher = Sha1::new();
        hasher.update(MAILTO_PREFIX.as_bytes());
        hasher.update(email.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Accept an already computed digest (any hex case)
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        SHA1_HEX_REGEX
            .is_match(hex)
            .then(|| Self(hex.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a literal found in a document.
    ///
    /// Publishers are inconsistent about case and stray whitespace.
    pub fn matches(&self, literal: &str) -> bool {
        literal.trim().eq_ignore_ascii_case(&self.0)
    }
}

impl fmt::Display for MailboxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MailboxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
