//! Secret Code Value Object
//!
//! The unlock code travels in plaintext inside the shareable link, so the
//! gate built on it is a presentation gate and not access control.
//! Comparison is exact and case-sensitive; no normalisation is applied.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretCode(String);

impl SecretCode {
    /// Build from the `code` query parameter. Absent or empty means no code.
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        value.filter(|v| !v.is_empty()).map(|v| Self(v.to_string()))
    }

    /// Exact string equality with a candidate.
    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_is_absent() {
        assert!(SecretCode::from_param(None).is_none());
        assert!(SecretCode::from_param(Some("")).is_none());
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        let code = SecretCode::from_param(Some("Cake42")).unwrap();
        assert!(code.matches("Cake42"));
        assert!(!code.matches("cake42"));
        assert!(!code.matches("Cake42 "));
        assert!(!code.matches(""));
    }
}
