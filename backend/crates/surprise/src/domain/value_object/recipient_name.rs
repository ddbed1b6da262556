//! Recipient Name Value Object
//!
//! The name a surprise is addressed to. It is display text only, never a
//! lookup key, so it is kept exactly as the operator typed it.

use std::fmt;

/// Name used when the link carries none.
pub const DEFAULT_RECIPIENT_NAME: &str = "Birthday Star";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientName(String);

impl RecipientName {
    /// Build from the `name` query parameter.
    ///
    /// An absent or empty parameter yields [`DEFAULT_RECIPIENT_NAME`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self(v.to_string()),
            _ => Self::default(),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecipientName {
    fn default() -> Self {
        Self(DEFAULT_RECIPIENT_NAME.to_string())
    }
}

impl fmt::Display for RecipientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
