//! Versioning configuration
//!
//! [`ApiVersioningOptions`] owns every collaborator the negotiator needs: the
//! reader, parser, selector and reporter. It is built once at startup and
//! passed explicitly to whoever negotiates versions.
//!
//! [`VersioningSettings`] is the plain-data form, deserializable from config
//! files or (with the `config` feature) from `APIVER_*` environment variables.
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver::options::{ApiVersioningOptions, VersioningSettings};
//!
//! let options = ApiVersioningOptions::try_from(VersioningSettings::from_env()?)?
//!     .report_api_versions(true);
//! ```

use crate::error::VersioningError;
use crate::model::ApiVersionModel;
use crate::parser::{ApiVersionParser, DefaultApiVersionParser};
use crate::reader::{
    ApiVersionReader, CompositeApiVersionReader, HeaderApiVersionReader,
    MediaTypeApiVersionReader, QueryStringApiVersionReader, UrlSegmentApiVersionReader,
    DEFAULT_QUERY_PARAMETER,
};
use crate::reporting::{ApiVersionReporter, DefaultApiVersionReporter};
use crate::request::RequestLike;
use crate::selector::{
    ApiVersionSelector, CurrentImplementationApiVersionSelector,
    LowestImplementedApiVersionSelector,
};
use crate::version::ApiVersion;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Configuration for API version negotiation
#[derive(Clone)]
pub struct ApiVersioningOptions {
    default_api_version: ApiVersion,
    assume_default_version_when_unspecified: bool,
    report_api_versions: bool,
    reader: Arc<dyn ApiVersionReader>,
    parser: Arc<dyn ApiVersionParser>,
    selector: Option<Arc<dyn ApiVersionSelector>>,
    reporter: Arc<dyn ApiVersionReporter>,
}

impl Default for ApiVersioningOptions {
    fn default() -> Self {
        Self {
            default_api_version: ApiVersion::new(1, 0),
            assume_default_version_when_unspecified: false,
            report_api_versions: false,
            reader: Arc::new(QueryStringApiVersionReader::default()),
            parser: Arc::new(DefaultApiVersionParser),
            selector: None,
            reporter: Arc::new(DefaultApiVersionReporter::default()),
        }
    }
}

impl fmt::Debug for ApiVersioningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiVersioningOptions")
            .field("default_api_version", &self.default_api_version)
            .field(
                "assume_default_version_when_unspecified",
                &self.assume_default_version_when_unspecified,
            )
            .field("report_api_versions", &self.report_api_versions)
            .field("custom_selector", &self.selector.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiVersioningOptions {
    /// Options with the defaults: version `1.0`, `api-version` query reader,
    /// no assumed default, no reporting
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default version
    pub fn default_api_version(mut self, version: ApiVersion) -> Self {
        self.default_api_version = version;
        self
    }

    /// Select a version for requests that do not specify one
    pub fn assume_default_version_when_unspecified(mut self, assume: bool) -> Self {
        self.assume_default_version_when_unspecified = assume;
        self
    }

    /// Write supported/deprecated version headers on responses
    pub fn report_api_versions(mut self, report: bool) -> Self {
        self.report_api_versions = report;
        self
    }

    /// Set the version reader
    pub fn reader<R: ApiVersionReader + 'static>(mut self, reader: R) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Set the version parser
    pub fn parser<P: ApiVersionParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    /// Set the selection policy; by default the default version is selected
    pub fn selector<S: ApiVersionSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Arc::new(selector));
        self
    }

    /// Set the reporter
    pub fn reporter<R: ApiVersionReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// Configured default version
    pub fn get_default_api_version(&self) -> &ApiVersion {
        &self.default_api_version
    }

    /// Whether a version is selected for requests without one
    pub fn assumes_default_version(&self) -> bool {
        self.assume_default_version_when_unspecified
    }

    /// Whether versions are reported on responses
    pub fn reports_api_versions(&self) -> bool {
        self.report_api_versions
    }

    /// Configured reader
    pub fn get_reader(&self) -> &dyn ApiVersionReader {
        self.reader.as_ref()
    }

    /// Configured parser
    pub fn get_parser(&self) -> &dyn ApiVersionParser {
        self.parser.as_ref()
    }

    /// Configured reporter
    pub fn get_reporter(&self) -> &dyn ApiVersionReporter {
        self.reporter.as_ref()
    }

    /// Apply the selection policy
    pub fn select_version(&self, request: &dyn RequestLike, model: &ApiVersionModel) -> ApiVersion {
        match &self.selector {
            Some(selector) => selector.select_version(request, model),
            None => self.default_api_version.clone(),
        }
    }
}

/// Selection policy named in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorPolicy {
    /// Always the default version
    #[default]
    Default,
    /// Highest implemented version
    CurrentImplementation,
    /// Lowest implemented version
    LowestImplemented,
}

/// Plain versioning settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VersioningSettings {
    /// Default version text
    pub default_version: String,
    /// Select a version for requests without one
    pub assume_default_version_when_unspecified: bool,
    /// Report versions on responses
    pub report_api_versions: bool,
    /// Query parameter names; none disables query reading
    pub query_parameters: Vec<String>,
    /// Header names; none disables header reading
    pub header_names: Vec<String>,
    /// Media type parameter name, when media type versioning is used
    pub media_type_parameter: Option<String>,
    /// Route parameter name, when URL segment versioning is used
    pub route_parameter: Option<String>,
    /// Selection policy
    pub selector: SelectorPolicy,
}

impl Default for VersioningSettings {
    fn default() -> Self {
        Self {
            default_version: "1.0".to_string(),
            assume_default_version_when_unspecified: false,
            report_api_versions: false,
            query_parameters: vec![DEFAULT_QUERY_PARAMETER.to_string()],
            header_names: Vec::new(),
            media_type_parameter: None,
            route_parameter: None,
            selector: SelectorPolicy::Default,
        }
    }
}

impl VersioningSettings {
    /// Load settings from `APIVER_*` environment variables
    ///
    /// Lists are comma-separated, e.g. `APIVER_HEADER_NAMES=api-version,x-ms-version`.
    #[cfg(feature = "config")]
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("APIVER_").from_env()
    }

    fn build_reader(&self) -> CompositeApiVersionReader {
        let mut reader = CompositeApiVersionReader::new();

        let query: Vec<&String> = self
            .query_parameters
            .iter()
            .filter(|name| !name.trim().is_empty())
            .collect();
        if !query.is_empty() {
            reader = reader.with(QueryStringApiVersionReader::new(query.into_iter().cloned()));
        }

        let headers = HeaderApiVersionReader::new(self.header_names.iter().cloned());
        if !headers.header_names().is_empty() {
            reader = reader.with(headers);
        }

        if let Some(name) = &self.media_type_parameter {
            reader = reader.with(MediaTypeApiVersionReader::new(name.clone()));
        }

        if let Some(name) = &self.route_parameter {
            reader = reader.with(UrlSegmentApiVersionReader::new(name.clone()));
        }

        reader
    }
}

impl TryFrom<VersioningSettings> for ApiVersioningOptions {
    type Error = VersioningError;

    fn try_from(settings: VersioningSettings) -> Result<Self, Self::Error> {
        let default_version: ApiVersion = settings
            .default_version
            .parse()
            .map_err(|e| VersioningError::invalid_format(settings.default_version.clone(), e))?;

        let options = Self::new()
            .default_api_version(default_version.clone())
            .assume_default_version_when_unspecified(settings.assume_default_version_when_unspecified)
            .report_api_versions(settings.report_api_versions)
            .reader(settings.build_reader());

        let options = match settings.selector {
            SelectorPolicy::Default => options,
            SelectorPolicy::CurrentImplementation => {
                options.selector(CurrentImplementationApiVersionSelector::new(default_version))
            }
            SelectorPolicy::LowestImplemented => {
                options.selector(LowestImplementedApiVersionSelector::new(default_version))
            }
        };

        tracing::debug!(options = ?options, "Configured API versioning");
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{ApiVersionParameterDescriptions, ParameterLocation};
    use http::Request;

    fn v(text: &str) -> ApiVersion {
        text.parse().unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = ApiVersioningOptions::new();
        let request = Request::get("/").body(()).unwrap();

        assert_eq!(options.get_default_api_version(), &v("1.0"));
        assert!(!options.assumes_default_version());
        assert!(!options.reports_api_versions());
        assert_eq!(options.select_version(&request, &ApiVersionModel::empty()), v("1.0"));
    }

    #[test]
    fn test_custom_selector_is_used() {
        let options = ApiVersioningOptions::new()
            .default_api_version(v("42.0"))
            .selector(CurrentImplementationApiVersionSelector::new(v("42.0")));
        let model = ApiVersionModel::new(Vec::new(), vec![v("1.0"), v("2.0")], Vec::new(), Vec::new(), Vec::new());
        let request = Request::get("/").body(()).unwrap();

        assert_eq!(options.select_version(&request, &model), v("2.0"));
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: VersioningSettings = serde_json::from_str(
            r#"{"header_names": ["api-version"], "selector": "lowest_implemented"}"#,
        )
        .unwrap();

        assert_eq!(settings.default_version, "1.0");
        assert_eq!(settings.query_parameters, vec!["api-version"]);
        assert_eq!(settings.selector, SelectorPolicy::LowestImplemented);
    }

    #[test]
    fn test_settings_into_options() {
        let settings = VersioningSettings {
            default_version: "2.0".to_string(),
            header_names: vec!["x-ms-version".to_string()],
            media_type_parameter: Some("v".to_string()),
            route_parameter: Some("version".to_string()),
            report_api_versions: true,
            ..Default::default()
        };
        let options = ApiVersioningOptions::try_from(settings).unwrap();

        assert_eq!(options.get_default_api_version(), &v("2.0"));
        assert!(options.reports_api_versions());

        let mut descriptions = ApiVersionParameterDescriptions::new();
        options.get_reader().describe(&mut descriptions);
        let locations: Vec<_> = descriptions.parameters().iter().map(|p| p.location).collect();
        assert_eq!(
            locations,
            vec![
                ParameterLocation::Query,
                ParameterLocation::Header,
                ParameterLocation::MediaTypeParameter,
                ParameterLocation::Path,
            ]
        );
    }

    #[test]
    fn test_invalid_default_version_is_rejected() {
        let settings = VersioningSettings {
            default_version: "one".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            ApiVersioningOptions::try_from(settings),
            Err(VersioningError::InvalidFormat { .. })
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    #[serial_test::serial]
    fn test_settings_from_env() {
        std::env::set_var("APIVER_DEFAULT_VERSION", "2013-08-06");
        std::env::set_var("APIVER_HEADER_NAMES", "api-version,x-ms-version");
        std::env::set_var("APIVER_SELECTOR", "current_implementation");

        let settings = VersioningSettings::from_env();

        std::env::remove_var("APIVER_DEFAULT_VERSION");
        std::env::remove_var("APIVER_HEADER_NAMES");
        std::env::remove_var("APIVER_SELECTOR");

        let settings = settings.unwrap();
        assert_eq!(settings.default_version, "2013-08-06");
        assert_eq!(settings.header_names, vec!["api-version", "x-ms-version"]);
        assert_eq!(settings.selector, SelectorPolicy::CurrentImplementation);
        assert_eq!(settings.query_parameters, vec!["api-version"]);
    }
}
