//! Error taxonomy shared by the TRE engine and the J2K tile codec bridge.

use std::panic::Location;
use thiserror::Error;

/// A single error record: kind, message, and the source location that
/// raised it. No operation in this crate recovers from an error internally;
/// callers inspect this record and decide what to do. Destructors never
/// fail; nothing in this crate returns `NitfError` from a `Drop` impl.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message} ({location})")]
pub struct NitfError {
    pub kind: ErrorKind,
    pub message: String,
    location: String,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Null/absent inputs, malformed tags, out-of-range arguments.
    #[error("invalid argument")]
    InvalidArgument,
    /// Short read/write, seek out of range.
    #[error("i/o failure")]
    IoFailure,
    /// Header invalid, length exceeds budget.
    #[error("parse error")]
    ParseError,
    /// Unresolved tag in an expression, unmatched block, stack overflow.
    #[error("schema error")]
    SchemaError,
    /// Decode/encode rejected by the pluggable codec back end.
    #[error("codec error")]
    CodecError,
    /// Allocation failure.
    #[error("resource error")]
    ResourceError,
}

impl NitfError {
    #[track_caller]
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self {
            kind,
            message: message.into(),
            location: format!("{}:{}:{}", location.file(), location.line(), location.column()),
        }
    }

    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    #[track_caller]
    pub fn io_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoFailure, message)
    }

    #[track_caller]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    #[track_caller]
    pub fn schema_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaError, message)
    }

    #[track_caller]
    pub fn codec_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CodecError, message)
    }

    #[track_caller]
    pub fn resource_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResourceError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

pub type Result<T> = std::result::Result<T, NitfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_kind_and_message() {
        let err = NitfError::schema_error("unresolved tag COUNT");
        assert_eq!(err.kind(), ErrorKind::SchemaError);
        assert_eq!(err.message, "unresolved tag COUNT");
        assert!(err.location().contains("error.rs"));
    }
}
