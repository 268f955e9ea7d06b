//! Per-request version negotiation
//!
//! The negotiator ties the pieces together: read raw candidates, resolve them
//! to at most one value, parse it, fall back to the selector when nothing was
//! requested, and check the result against the endpoint's model.

use crate::description::ApiVersionParameterDescriptions;
use crate::error::{Result, VersioningError};
use crate::model::ApiVersionModel;
use crate::options::ApiVersioningOptions;
use crate::request::{RequestLike, ResponseLike};
use crate::resolver::RequestedApiVersion;
use crate::version::ApiVersion;
use serde::Serialize;

/// Where the negotiated version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionSource {
    /// The client asked for it
    Requested,
    /// Chosen by the selector because the client did not ask
    Assumed,
    /// The endpoint is version-neutral and the client did not ask
    Neutral,
}

/// Result of a successful negotiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiatedApiVersion {
    version: ApiVersion,
    source: VersionSource,
    deprecated: bool,
}

impl NegotiatedApiVersion {
    /// Version to serve; the neutral value for unversioned neutral requests
    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    /// Where the version came from
    pub fn source(&self) -> VersionSource {
        self.source
    }

    /// Whether the endpoint deprecates this version
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Consume into the version
    pub fn into_version(self) -> ApiVersion {
        self.version
    }
}

/// Negotiates versions using one set of options
#[derive(Debug, Clone, Default)]
pub struct ApiVersionNegotiator {
    options: ApiVersioningOptions,
}

impl ApiVersionNegotiator {
    /// Create a negotiator
    pub fn new(options: ApiVersioningOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &ApiVersioningOptions {
        &self.options
    }

    /// Read and parse the requested version without consulting any model
    pub fn requested_version(&self, request: &dyn RequestLike) -> Result<Option<ApiVersion>> {
        match self.options.get_reader().read_version(request)? {
            RequestedApiVersion::Unspecified => Ok(None),
            RequestedApiVersion::Requested(text) => self
                .options
                .get_parser()
                .parse(&text)
                .map(Some)
                .map_err(|e| {
                    tracing::debug!(text = %text, error = %e, "Malformed API version");
                    VersioningError::invalid_format(text, e)
                }),
        }
    }

    /// Negotiate the version for a request against an endpoint's model
    pub fn negotiate(
        &self,
        request: &dyn RequestLike,
        model: &ApiVersionModel,
    ) -> Result<NegotiatedApiVersion> {
        let (version, source) = match self.requested_version(request)? {
            Some(version) => (version, VersionSource::Requested),
            None if model.is_api_version_neutral() => (ApiVersion::neutral(), VersionSource::Neutral),
            None if self.options.assumes_default_version() => (
                self.options.select_version(request, model),
                VersionSource::Assumed,
            ),
            None => {
                tracing::debug!("API version required but not specified");
                return Err(VersioningError::Unspecified);
            }
        };

        if source != VersionSource::Neutral && !model.implements(&version) {
            tracing::debug!(version = %version, "Unsupported API version requested");
            return Err(VersioningError::Unsupported { requested: version });
        }

        let deprecated = model.is_deprecated(&version);
        tracing::trace!(
            version = %version,
            source = ?source,
            deprecated,
            "Negotiated API version"
        );

        Ok(NegotiatedApiVersion {
            version,
            source,
            deprecated,
        })
    }

    /// Report the model's versions when reporting is enabled
    pub fn report(&self, response: &mut dyn ResponseLike, model: &ApiVersionModel) {
        if self.options.reports_api_versions() {
            self.options.get_reporter().report(response, model);
        }
    }

    /// Parameters the configured reader looks at
    pub fn describe_parameters(&self) -> ApiVersionParameterDescriptions {
        let mut descriptions = ApiVersionParameterDescriptions::new();
        self.options.get_reader().describe(&mut descriptions);
        descriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::ParameterLocation;
    use crate::reader::{ApiVersionReaderExt, HeaderApiVersionReader, QueryStringApiVersionReader};
    use crate::selector::CurrentImplementationApiVersionSelector;
    use http::{HeaderMap, Request};

    fn v(text: &str) -> ApiVersion {
        text.parse().unwrap()
    }

    fn model() -> ApiVersionModel {
        ApiVersionModel::new(Vec::new(), vec![v("1.0"), v("2.0")], vec![v("0.9")], Vec::new(), Vec::new())
    }

    fn get(uri: &str) -> Request<()> {
        Request::get(uri).body(()).unwrap()
    }

    #[test]
    fn test_requested_version() {
        let negotiator = ApiVersionNegotiator::default();
        let negotiated = negotiator.negotiate(&get("/?api-version=2.0"), &model()).unwrap();

        assert_eq!(negotiated.version(), &v("2.0"));
        assert_eq!(negotiated.source(), VersionSource::Requested);
        assert!(!negotiated.is_deprecated());
    }

    #[test]
    fn test_deprecated_version_is_flagged() {
        let negotiated = ApiVersionNegotiator::default()
            .negotiate(&get("/?api-version=0.9"), &model())
            .unwrap();

        assert!(negotiated.is_deprecated());
    }

    #[test]
    fn test_unspecified_without_assumption_is_an_error() {
        let err = ApiVersionNegotiator::default().negotiate(&get("/"), &model()).unwrap_err();

        assert_eq!(err, VersioningError::Unspecified);
    }

    #[test]
    fn test_unspecified_uses_selector() {
        let options = ApiVersioningOptions::new()
            .assume_default_version_when_unspecified(true)
            .selector(CurrentImplementationApiVersionSelector::new(v("1.0")));
        let negotiated = ApiVersionNegotiator::new(options).negotiate(&get("/"), &model()).unwrap();

        assert_eq!(negotiated.version(), &v("2.0"));
        assert_eq!(negotiated.source(), VersionSource::Assumed);
    }

    #[test]
    fn test_assumed_default_must_be_implemented() {
        let options = ApiVersioningOptions::new()
            .default_api_version(v("3.0"))
            .assume_default_version_when_unspecified(true);
        let err = ApiVersionNegotiator::new(options).negotiate(&get("/"), &model()).unwrap_err();

        assert_eq!(err, VersioningError::Unsupported { requested: v("3.0") });
    }

    #[test]
    fn test_neutral_endpoint() {
        let negotiator = ApiVersionNegotiator::default();
        let neutral = ApiVersionModel::neutral();

        let unversioned = negotiator.negotiate(&get("/"), &neutral).unwrap();
        assert_eq!(unversioned.source(), VersionSource::Neutral);
        assert!(unversioned.version().is_neutral());

        let versioned = negotiator.negotiate(&get("/?api-version=7.0"), &neutral).unwrap();
        assert_eq!(versioned.version(), &v("7.0"));
    }

    #[test]
    fn test_malformed_version_is_rejected() {
        let err = ApiVersionNegotiator::default()
            .negotiate(&get("/?api-version=abc"), &model())
            .unwrap_err();

        assert!(matches!(err, VersioningError::InvalidFormat { ref text, .. } if text == "abc"));
        assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unsupported_version() {
        let err = ApiVersionNegotiator::default()
            .negotiate(&get("/?api-version=5.0"), &model())
            .unwrap_err();

        assert_eq!(err, VersioningError::Unsupported { requested: v("5.0") });
    }

    #[test]
    fn test_cross_location_conflict() {
        let reader = QueryStringApiVersionReader::default()
            .combine(HeaderApiVersionReader::new(["api-version"]));
        let negotiator = ApiVersionNegotiator::new(ApiVersioningOptions::new().reader(reader));
        let request = Request::get("/?api-version=1.0")
            .header("api-version", "2.0")
            .body(())
            .unwrap();

        let err = negotiator.negotiate(&request, &model()).unwrap_err();
        assert_eq!(
            err,
            VersioningError::ambiguous(vec!["1.0".to_string(), "2.0".to_string()])
        );
    }

    #[test]
    fn test_report_respects_option() {
        let mut headers = HeaderMap::new();
        ApiVersionNegotiator::default().report(&mut headers, &model());
        assert!(headers.is_empty());

        let negotiator = ApiVersionNegotiator::new(ApiVersioningOptions::new().report_api_versions(true));
        negotiator.report(&mut headers, &model());
        assert_eq!(headers["api-supported-versions"], "1.0, 2.0");
        assert_eq!(headers["api-deprecated-versions"], "0.9");
    }

    #[test]
    fn test_describe_parameters() {
        let descriptions = ApiVersionNegotiator::default().describe_parameters();

        assert_eq!(descriptions.parameters().len(), 1);
        assert_eq!(descriptions.parameters()[0].name, "api-version");
        assert_eq!(descriptions.parameters()[0].location, ParameterLocation::Query);
    }
}
