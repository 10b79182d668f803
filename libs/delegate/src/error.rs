//! Error types for delegate hook evaluation.

use pictor_meta_id::MalformedMetaIdentifier;
use thiserror::Error;

/// Errors that can occur when evaluating a delegate hook.
#[derive(Debug, Error)]
pub enum DelegateError {
    /// The hook itself failed to evaluate.
    #[error("hook evaluation failed: {0}")]
    Evaluation(String),

    /// A meta-identifier could not be decoded.
    #[error(transparent)]
    MetaIdentifier(#[from] MalformedMetaIdentifier),

    /// A rule file could not be read.
    #[error("rule file error: {0}")]
    Io(#[from] std::io::Error),

    /// A rule file could not be parsed.
    #[error("rule parse error: {0}")]
    Rules(#[from] serde_json::Error),
}
