//! Error types for API version negotiation

use crate::version::{ApiVersion, ConstructionError, VersionParseError};
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for versioning operations
pub type Result<T, E = VersioningError> = std::result::Result<T, E>;

/// Errors raised while negotiating an API version
///
/// None of these are retried; the host maps them to an HTTP response with
/// [`VersioningError::status_code`] and [`VersioningError::to_response`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersioningError {
    /// The requested version text does not match the version grammar
    #[error("the HTTP resource does not support the API version '{text}': {source}")]
    InvalidFormat {
        /// Raw text sent by the client
        text: String,
        /// Parse failure
        #[source]
        source: VersionParseError,
    },

    /// Two or more distinct versions were supplied in one request
    #[error("the following API versions were requested: {}; at most one API version may be specified", .candidates.join(", "))]
    Ambiguous {
        /// Every distinct raw value that conflicted
        candidates: Vec<String>,
    },

    /// The requested version is not implemented by the endpoint
    #[error("the HTTP resource does not support the API version '{requested}'")]
    Unsupported {
        /// Version sent by the client
        requested: ApiVersion,
    },

    /// No version was supplied and no default may be assumed
    #[error("an API version is required, but was not specified")]
    Unspecified,

    /// A version or model was built from invalid parts
    #[error("invalid API version configuration: {0}")]
    InvalidConstruction(#[from] ConstructionError),
}

/// Stable error codes reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    /// Malformed version text
    InvalidApiVersion,
    /// Conflicting versions in one request
    AmbiguousApiVersion,
    /// Version not implemented by the endpoint
    UnsupportedApiVersion,
    /// Version required but missing
    ApiVersionUnspecified,
    /// Server-side configuration problem
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::InvalidApiVersion => "InvalidApiVersion",
            Self::AmbiguousApiVersion => "AmbiguousApiVersion",
            Self::UnsupportedApiVersion => "UnsupportedApiVersion",
            Self::ApiVersionUnspecified => "ApiVersionUnspecified",
            Self::InternalError => "InternalError",
        };
        f.write_str(code)
    }
}

impl VersioningError {
    /// Create a format error for the given text
    pub fn invalid_format(text: impl Into<String>, source: VersionParseError) -> Self {
        Self::InvalidFormat {
            text: text.into(),
            source,
        }
    }

    /// Create an ambiguity error listing the conflicting candidates
    pub fn ambiguous(candidates: Vec<String>) -> Self {
        Self::Ambiguous { candidates }
    }

    /// Error code reported to the client
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidFormat { .. } => ErrorCode::InvalidApiVersion,
            Self::Ambiguous { .. } => ErrorCode::AmbiguousApiVersion,
            Self::Unsupported { .. } => ErrorCode::UnsupportedApiVersion,
            Self::Unspecified => ErrorCode::ApiVersionUnspecified,
            Self::InvalidConstruction(_) => ErrorCode::InternalError,
        }
    }

    /// HTTP status the host should answer with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Serializable error body
    pub fn to_response(&self) -> ErrorResponse {
        self.into()
    }
}

/// JSON representation of a versioning error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorBody,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Conflicting raw values, for ambiguity errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<String>>,
}

impl From<&VersioningError> for ErrorResponse {
    fn from(err: &VersioningError) -> Self {
        let candidates = match err {
            VersioningError::Ambiguous { candidates } => Some(candidates.clone()),
            _ => None,
        };

        Self {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
                candidates,
            },
        }
    }
}
