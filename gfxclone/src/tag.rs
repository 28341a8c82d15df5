use std::fmt;
use std::str::FromStr;

use crate::error::RetargetError;

/// A three-letter country tag, always stored uppercase (e.g. "BLR", "LIT").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Parses a tag, trimming whitespace and normalising to uppercase.
    pub fn parse(input: &str) -> Result<Self, RetargetError> {
        let tag = input.trim().to_ascii_uppercase();
        let invalid = |reason: &str| RetargetError::InvalidTag {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        if tag.chars().count() != 3 {
            return Err(invalid("expected exactly 3 characters"));
        }
        if !tag.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("only letters A-Z are allowed"));
        }

        Ok(Tag(tag))
    }

    /// Builds a tag from a literal already known to be valid.
    pub(crate) fn from_static(tag: &'static str) -> Self {
        debug_assert!(tag.len() == 3 && tag.bytes().all(|b| b.is_ascii_uppercase()));
        Tag(tag.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, as used in entity names (e.g. "blr_infantry_entity").
    pub fn lower(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Tag {
    type Err = RetargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::parse(s)
    }
}
