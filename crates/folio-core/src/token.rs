//! API token type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A bearer token for authenticated API requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new token.
    ///
    /// Tokens must be non-empty and contain only visible ASCII, since they
    /// travel in an HTTP header.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(InvalidInputError::Token {
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if !token.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidInputError::Token {
                reason: "must be visible ASCII without spaces".to_string(),
            }
            .into());
        }
        Ok(Self(token))
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = ApiToken::new("hn_secret_value").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("hn_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn token_is_trimmed_and_validated() {
        assert_eq!(ApiToken::new("  abc  ").unwrap().expose(), "abc");
        assert!(ApiToken::new("   ").is_err());
        assert!(ApiToken::new("a b").is_err());
    }
}
