//! Error types for the Transifex API client.
//!
//! # Design
//! `TransifexError` is the closed set of client-side misuse errors. Every
//! variant is raised before a request is built, so a caller that receives one
//! knows nothing went over the wire. `ApiError` is what connector calls
//! return: it wraps the taxonomy and passes transport failures through
//! untouched.

use std::path::PathBuf;

use thiserror::Error;

use crate::http::TransportError;

/// Client-side errors originating in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransifexError {
    /// A required argument or option was empty (member list, resource
    /// update, base URI).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Content was supplied with a type other than `string` or `file`.
    #[error("invalid file type: {0}")]
    InvalidFileType(String),

    /// Username or password was absent when constructing a connector.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// A referenced local file does not exist.
    #[error("the specified file, \"{}\", does not exist", .0.display())]
    MissingFile(PathBuf),

    /// The factory does not know a connector by this name.
    #[error("unknown API connector \"{0}\"")]
    UnknownApiConnector(String),
}

/// Errors returned by connector operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transifex(#[from] TransifexError),

    /// Returned by the transport as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A file that exists could not be read.
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl ApiError {
    /// The taxonomy variant, if this error was raised by client-side validation.
    pub fn as_transifex(&self) -> Option<&TransifexError> {
        match self {
            ApiError::Transifex(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_message_names_the_path() {
        let err = TransifexError::MissingFile(PathBuf::from("/tmp/nope.po"));
        assert_eq!(err.to_string(), "the specified file, \"/tmp/nope.po\", does not exist");
    }

    #[test]
    fn api_error_exposes_taxonomy_variant() {
        let err: ApiError = TransifexError::UnknownApiConnector("x".to_string()).into();
        assert!(matches!(
            err.as_transifex(),
            Some(TransifexError::UnknownApiConnector(name)) if name == "x"
        ));

        let err: ApiError = TransportError::new("connection refused").into();
        assert!(err.as_transifex().is_none());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
