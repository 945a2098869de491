//! Error types for the Sayingly catalog query layer.

use thiserror::Error;

use crate::content::ContentType;

/// Result type alias using the catalog's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for catalog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Backend query/transport failure (wraps sqlx::Error).
    #[error("Fetch error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested content item does not exist.
    #[error("Content not found: {content_type}/{id}")]
    ContentNotFound {
        content_type: ContentType,
        id: String,
    },

    /// Referenced language code has no row in the language table.
    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    /// Misconfiguration, e.g. a content type with no registered field mapping.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input (bad order column, malformed identifier).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_content_not_found() {
        let err = Error::ContentNotFound {
            content_type: ContentType::Idiom,
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Content not found: idiom/42");
    }

    #[test]
    fn test_error_display_language_not_found() {
        let err = Error::LanguageNotFound("xx".to_string());
        assert_eq!(err.to_string(), "Language not found: xx");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("no field mapping for riddle".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: no field mapping for riddle"
        );
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("bad order column".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad order column");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
