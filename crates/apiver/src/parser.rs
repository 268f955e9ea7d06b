//! Injectable API version parser

use crate::version::{ApiVersion, VersionParseError};

/// Turns raw version text into an [`ApiVersion`]
///
/// The negotiator owns one parser through its options, so a service can swap
/// in a stricter or more lenient grammar without touching the readers.
pub trait ApiVersionParser: Send + Sync {
    /// Parse raw version text
    fn parse(&self, text: &str) -> Result<ApiVersion, VersionParseError>;
}

/// Parser for the canonical version grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultApiVersionParser;

impl ApiVersionParser for DefaultApiVersionParser {
    fn parse(&self, text: &str) -> Result<ApiVersion, VersionParseError> {
        text.parse()
    }
}

impl<F> ApiVersionParser for F
where
    F: Fn(&str) -> Result<ApiVersion, VersionParseError> + Send + Sync,
{
    fn parse(&self, text: &str) -> Result<ApiVersion, VersionParseError> {
        self(text)
    }
}
