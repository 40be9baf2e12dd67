//! Endpoint identifiers.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier rejection reason.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("No userId provided")]
    Missing,
    #[error("Empty userId provided")]
    Empty,
}

/// Client-chosen name of one logical endpoint.
///
/// Opaque apart from being non-empty. Uniqueness is not checked here; the
/// registry resolves duplicates by last-writer-wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Parse an identifier taken from the connection request.
    ///
    /// # Errors
    /// Returns error if the value is absent or empty.
    pub fn parse(raw: Option<&str>) -> Result<Self, IdentifierError> {
        let raw = raw.ok_or(IdentifierError::Missing)?;
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_non_empty() {
        let id = Identifier::parse(Some("alice")).unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn test_parse_rejects_missing_and_empty() {
        assert_eq!(Identifier::parse(None), Err(IdentifierError::Missing));
        assert_eq!(Identifier::parse(Some("")), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_parse_accepts_whitespace_only() {
        let id = Identifier::parse(Some("   ")).unwrap();
        assert_eq!(id.as_str(), "   ");
    }

    #[test]
    fn test_identifier_keeps_surrounding_text_verbatim() {
        let id = Identifier::try_from(" bob ").unwrap();
        assert_eq!(id.as_str(), " bob ");
    }

    #[test]
    fn test_borrow_as_str_for_map_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(Identifier::try_from("carol").unwrap(), 1);
        assert_eq!(map.get("carol"), Some(&1));
    }
}
