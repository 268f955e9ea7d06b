//! Reporting of supported and deprecated versions in response headers

use crate::model::ApiVersionModel;
use crate::request::ResponseLike;
use crate::version::ApiVersion;

/// Default header listing supported versions
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// Default header listing deprecated versions
pub const DEPRECATED_VERSIONS_HEADER: &str = "api-deprecated-versions";

/// Writes an endpoint's versions into a response
pub trait ApiVersionReporter: Send + Sync {
    /// Report the model's versions
    fn report(&self, response: &mut dyn ResponseLike, model: &ApiVersionModel);
}

/// Reports versions as comma-separated header values, e.g. `1.0, 2.0`
///
/// A header is skipped when its list is empty or the response already has it.
/// Neutral endpoints report nothing.
#[derive(Debug, Clone)]
pub struct DefaultApiVersionReporter {
    supported_header: String,
    deprecated_header: String,
}

impl DefaultApiVersionReporter {
    /// Reporter using custom header names
    pub fn new(supported_header: impl Into<String>, deprecated_header: impl Into<String>) -> Self {
        Self {
            supported_header: supported_header.into(),
            deprecated_header: deprecated_header.into(),
        }
    }

    fn write(response: &mut dyn ResponseLike, name: &str, versions: &[ApiVersion]) {
        if versions.is_empty() {
            return;
        }
        let value = join_versions(versions);
        response.write_header_if_absent(name, &value);
    }
}

impl Default for DefaultApiVersionReporter {
    fn default() -> Self {
        Self::new(SUPPORTED_VERSIONS_HEADER, DEPRECATED_VERSIONS_HEADER)
    }
}

impl ApiVersionReporter for DefaultApiVersionReporter {
    fn report(&self, response: &mut dyn ResponseLike, model: &ApiVersionModel) {
        if model.is_api_version_neutral() {
            return;
        }
        Self::write(response, &self.supported_header, &model.reported_supported_versions());
        Self::write(response, &self.deprecated_header, &model.reported_deprecated_versions());
    }
}

/// Join versions in canonical form with `", "`
pub fn join_versions(versions: &[ApiVersion]) -> String {
    versions
        .iter()
        .map(ApiVersion::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
