//! Error taxonomy.
//!
//! Every failure is a hard, synchronous error raised where it is detected.
//! Policy refusals (persist blocking a close, a veto on `toggle`) are not
//! errors: they leave state unchanged and emit nothing.

use thiserror::Error;

/// Errors raised by instance construction and fold transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelapseError {
    /// Construction targets a key or markup id already in the registry.
    #[error("an existing instance is using id \"{key}\"")]
    DuplicateInstance { key: String },

    /// A `{schema}-persist` / `{schema}-multiple` attribute is not `true`/`false`.
    #[error("invalid value for \"{attribute}\": boolean expected, received \"{value}\"")]
    InvalidBooleanAttribute { attribute: String, value: String },

    /// `expand`/`collapse`/`destroy` named a fold that does not exist.
    #[error("fold does not exist: \"{name}\"")]
    FoldNotFound { name: String },

    /// A transition referenced an index outside the fold sequence.
    #[error("no fold exists at index {index} (scope has {len})")]
    InvalidFoldIndex { index: usize, len: usize },

    /// The container's children do not form trigger/panel pairs.
    #[error("child {index} has no matching panel; children must come in trigger/panel pairs")]
    UnpairedChild { index: usize },

    /// A transition was requested on a fold that has been torn down.
    #[error("fold {index} has been destroyed")]
    FoldDestroyed { index: usize },

    /// A single-element lookup by identifier matched nothing.
    #[error("no element matches \"{selector}\"")]
    ElementNotFound { selector: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RelapseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = RelapseError::DuplicateInstance { key: "faq".into() };
        assert_eq!(err.to_string(), "an existing instance is using id \"faq\"");

        let err = RelapseError::InvalidBooleanAttribute {
            attribute: "data-relapse-multiple".into(),
            value: "maybe".into(),
        };
        assert!(err.to_string().contains("maybe"));

        let err = RelapseError::InvalidFoldIndex { index: 4, len: 2 };
        assert!(err.to_string().contains("index 4"));
    }
}
