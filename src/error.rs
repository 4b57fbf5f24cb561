use std::path::PathBuf;
use thiserror::Error;

use crate::reflect::Kind;

#[derive(Debug, Error)]
pub enum EnvfillError {
    /// The target record sits behind an unset `Option`.
    #[error("input record is unset")]
    NilInput,

    /// The target type is not a record.
    #[error("input must be a record type")]
    InvalidInput,

    /// A field's type has no coercion rule. Carries the offending kind so
    /// callers can report exactly what the engine cannot handle.
    #[error("unsupported field kind: {kind}")]
    UnsupportedKind { kind: Kind },

    /// A present source value could not be parsed into the field's type.
    #[error("cannot parse {value:?}: {reason}")]
    Coerce { value: String, reason: String },

    /// An overlay file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EnvfillError {
    /// True when the error reports a field type the engine cannot coerce.
    /// Lets callers special-case schema gaps without matching the variant.
    pub fn is_unsupported_kind(&self) -> bool {
        matches!(self, EnvfillError::UnsupportedKind { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_kind_formats_and_predicates() {
        let err = EnvfillError::UnsupportedKind { kind: Kind::Char };
        assert!(err.to_string().contains("char"));
        assert!(err.is_unsupported_kind());
    }

    #[test]
    fn coerce_formats_value_and_reason() {
        let err = EnvfillError::Coerce {
            value: "notaport".into(),
            reason: "invalid digit found in string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("notaport"));
        assert!(msg.contains("invalid digit"));
        assert!(!err.is_unsupported_kind());
    }

    #[test]
    fn io_formats_path() {
        let err = EnvfillError::Io {
            path: "/etc/app/.env".into(),
            source: std::io::Error::other("denied"),
        };
        assert!(err.to_string().contains("/etc/app/.env"));
    }
}
