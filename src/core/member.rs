use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a participant in an expense group.
///
/// A member can be identified by a wallet address, an email, or any
/// free-form string — the engine treats the identifier as an opaque key
/// with equality by value. No parsing, normalization, or validation is
/// performed here; address formatting is a presentation concern.
///
/// # Examples
///
/// ```
/// use split_engine::core::member::MemberId;
///
/// let alice = MemberId::new("alice@example.com");
/// let wallet = MemberId::new("0x4f3edf983ac636a65a842ce7c78d9aa706d3b113");
/// assert_ne!(alice, wallet);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new member identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this member ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display: long hex-style identifiers are elided
    /// to `0x1234…cdef`, anything else is returned untouched.
    pub fn short(&self) -> String {
        if self.0.is_ascii() && self.0.starts_with("0x") && self.0.len() > 12 {
            format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
