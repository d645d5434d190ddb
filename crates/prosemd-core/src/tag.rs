//! Release version tags.

use std::fmt;

use crate::error::AcquireError;

/// A release tag such as `v0.1.0`.
///
/// The tag is used verbatim in both the local file name and the remote URL,
/// so anything that would change the meaning of either is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(tag: impl Into<String>) -> Result<Self, AcquireError> {
        let tag = tag.into();
        if let Some(reason) = rejection_reason(&tag) {
            return Err(AcquireError::InvalidTag { tag, reason });
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn rejection_reason(tag: &str) -> Option<&'static str> {
    if tag.is_empty() {
        return Some("tag cannot be empty");
    }
    if tag.contains("..") {
        return Some("tag cannot contain '..'");
    }
    if tag.chars().any(|c| matches!(c, '/' | '\\')) {
        return Some("tag cannot contain path separators");
    }
    if tag
        .chars()
        .any(|c| matches!(c, ':' | '<' | '>' | '"' | '|' | '*'))
    {
        return Some("tag contains characters that are not allowed in file names");
    }
    if tag
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#' | '%'))
    {
        return Some("tag contains characters that are not URL-safe");
    }
    None
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
