//! Errors raised by artifact property and value operations.

use thiserror::Error;

/// Failures of a single artifact operation.
///
/// Every variant is local to the call that produced it; the artifact's
/// previously valid state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
    #[error("Property '{property}' is not declared for artifact kind {kind}")]
    SchemaViolation { kind: String, property: String },

    #[error("Expecting {expected} but got value {value} of type {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        value: String,
    },

    #[error("Property '{property}' has not been set on artifact kind {kind}")]
    PropertyNotSet { kind: String, property: String },

    #[error("Cannot decode {kind} payload: {reason}")]
    DecodingFailure { kind: String, reason: String },

    #[error("Unknown artifact kind: {0}")]
    UnknownKind(String),

    #[error("Artifact kind {0} does not carry a value")]
    NotAValueKind(String),

    #[error("The {kind} artifact value has not yet been read from storage")]
    ValueUnavailable { kind: String },

    #[error("Artifact of kind {kind} has no uri")]
    UriNotSet { kind: String },

    #[error("Invalid split name {name:?}: {reason}")]
    InvalidSplitName { name: String, reason: String },
}

impl ArtifactError {
    pub(crate) fn type_mismatch(
        expected: impl Into<String>,
        found: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
            value: value.into(),
        }
    }

    pub(crate) fn decoding(kind: impl Into<String>, reason: impl ToString) -> Self {
        Self::DecodingFailure {
            kind: kind.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = ArtifactError::type_mismatch("int", "str", "\"5\"");
        assert_eq!(
            err.to_string(),
            "Expecting int but got value \"5\" of type str"
        );
    }
}
