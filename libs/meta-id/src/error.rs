//! Error type for meta-identifier decoding.

use thiserror::Error;

/// The input string could not be decoded as a meta-identifier.
///
/// This is the only way decoding fails: either the input was empty, or
/// stripping the trailing structured fields left an empty identifier.
/// Encoding has no error path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed meta-identifier: {reason}")]
pub struct MalformedMetaIdentifier {
    reason: &'static str,
}

impl MalformedMetaIdentifier {
    pub(crate) const EMPTY_INPUT: Self = Self {
        reason: "input is empty",
    };

    pub(crate) const EMPTY_IDENTIFIER: Self = Self {
        reason: "identifier portion is empty",
    };

    /// Returns a short description of what was malformed.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}
