//! Error types for fredtools.

use thiserror::Error;

/// Result type alias for fredtools operations.
pub type Result<T> = std::result::Result<T, FredError>;

/// Errors that can occur while talking to FRED and decoding its responses.
#[derive(Error, Debug)]
pub enum FredError {
    /// No client was passed and none is registered for the current thread.
    #[error(
        "No current client set. Pass a client explicitly or register one with set_default_client(...)."
    )]
    NoCurrentClient,

    /// An entity was constructed without its identifier.
    #[error("Configuration error: a {kind} requires an identifier")]
    MissingIdentifier {
        /// The entity kind (e.g. "series").
        kind: &'static str,
    },

    /// Invalid or incomplete client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lookup by identifier returned no records.
    #[error("No {kind} found with id {id}")]
    NotFound {
        /// The entity kind that was looked up.
        kind: &'static str,
        /// The identifier that matched nothing.
        id: String,
    },

    /// The response is missing structure the caller depends on.
    #[error("Unexpected response shape: {0}")]
    UpstreamShape(String),

    /// A numeric-looking field could not be normalized.
    #[error("Cannot convert {field} value {value} to the expected type")]
    Conversion {
        /// Field being converted.
        field: String,
        /// The offending raw value, rendered as JSON.
        value: String,
    },

    /// An optional capability was requested but is not compiled in.
    #[error("Missing optional capability: {0}")]
    MissingCapability(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// FRED answered with an error status.
    #[error("FRED API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by FRED.
        message: String,
    },

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FredError {
    /// Builds a conversion error for `field` holding `value`.
    pub fn conversion(field: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::Conversion {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Returns true for the configuration error family.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::NoCurrentClient | Self::MissingIdentifier { .. } | Self::Config(_)
        )
    }

    /// Returns true if a lookup matched nothing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_current_client_names_both_remedies() {
        let message = FredError::NoCurrentClient.to_string();
        assert!(message.contains("Pass a client explicitly"));
        assert!(message.contains("set_default_client"));
        assert!(FredError::NoCurrentClient.is_config());
    }

    #[test]
    fn test_not_found_names_identifier() {
        let err = FredError::NotFound {
            kind: "series",
            id: "GNPCA".to_string(),
        };
        assert_eq!(err.to_string(), "No series found with id GNPCA");
        assert!(err.is_not_found());
        assert!(!err.is_config());
    }
}
