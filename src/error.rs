use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for version-tagger operations
#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("Source file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Version pattern did not match anything in {}", .0.display())]
    PatternNotFound(PathBuf),

    #[error("Version pattern matched but produced no `version` capture group")]
    MissingCaptureGroup,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Failed to fetch tags: {0}")]
    TagFetch(#[source] ApiError),

    #[error("Failed to build changelog: {0}")]
    Changelog(#[source] ApiError),

    #[error("No commit SHA available for this run")]
    MissingCommit,

    #[error("Failed to create tag object '{tag}': {source}")]
    TagCreation {
        tag: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to create reference '{reference}': {source}")]
    ReferenceCreation {
        reference: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to create release '{tag}': {source}")]
    ReleaseCreation {
        tag: String,
        #[source]
        source: ApiError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single hosting API round trip
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected API response: {0}")]
    Decode(String),

    #[error("API token contains invalid characters")]
    InvalidToken,

    #[error("Invalid request URL: {0}")]
    Url(String),
}

/// Convenience type alias for Results in version-tagger
pub type Result<T> = std::result::Result<T, TaggerError>;

/// Result of a hosting API call
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl TaggerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TaggerError::Config(msg.into())
    }

    /// Create an invalid pattern error with context
    pub fn invalid_pattern(msg: impl Into<String>) -> Self {
        TaggerError::InvalidPattern(msg.into())
    }
}

impl ApiError {
    /// Create a status error, as returned for non-2xx responses
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaggerError::config("missing api token");
        assert_eq!(err.to_string(), "Configuration error: missing api token");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TaggerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TaggerError::MissingFile(PathBuf::from("package.json"));
        assert_eq!(err.to_string(), "Source file not found: package.json");
    }

    #[test]
    fn test_api_errors_are_wrapped_with_step() {
        let err = TaggerError::TagFetch(ApiError::status(401, "Bad credentials"));
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to fetch tags"));
        assert!(msg.contains("401"));
        assert!(msg.contains("Bad credentials"));

        let err = TaggerError::ReferenceCreation {
            reference: "refs/tags/v1.0.0".to_string(),
            source: ApiError::status(422, "Reference already exists"),
        };
        assert!(err.to_string().contains("refs/tags/v1.0.0"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TaggerError::config("x"), "Configuration error"),
            (TaggerError::invalid_pattern("x"), "Invalid pattern"),
            (TaggerError::MissingCommit, "No commit SHA"),
            (TaggerError::MissingCaptureGroup, "Version pattern matched"),
            (
                TaggerError::Changelog(ApiError::Decode("x".to_string())),
                "Failed to build changelog",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
