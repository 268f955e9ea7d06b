//! Query string version writer

use super::ApiVersionWriter;
use crate::reader::DEFAULT_QUERY_PARAMETER;
use crate::request::OutgoingRequest;
use crate::version::ApiVersion;
use http::uri::PathAndQuery;
use http::Uri;

/// Appends `name=version` to the query string
///
/// An existing parameter with the same name (ignoring case) is left alone.
#[derive(Debug, Clone)]
pub struct QueryStringApiVersionWriter {
    parameter_name: String,
}

impl QueryStringApiVersionWriter {
    /// Writer for the given parameter name
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
        }
    }

    fn has_parameter(&self, query: &str) -> bool {
        serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map(|pairs| {
                pairs
                    .iter()
                    .any(|(name, _)| name.eq_ignore_ascii_case(&self.parameter_name))
            })
            .unwrap_or(false)
    }
}

impl Default for QueryStringApiVersionWriter {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY_PARAMETER)
    }
}

impl ApiVersionWriter for QueryStringApiVersionWriter {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        let uri = request.uri();
        if uri.query().is_some_and(|query| self.has_parameter(query)) {
            return;
        }

        let pair = [(self.parameter_name.as_str(), version.to_string())];
        let encoded = match serde_urlencoded::to_string(&pair[..]) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode API version query parameter");
                return;
            }
        };

        let path_and_query = match uri.query() {
            Some(query) if !query.is_empty() => format!("{}?{}&{}", uri.path(), query, encoded),
            _ => format!("{}?{}", uri.path(), encoded),
        };

        match replace_path_and_query(uri, &path_and_query) {
            Some(uri) => request.set_uri(uri),
            None => tracing::warn!(path_and_query = %path_and_query, "Failed to rebuild request URI"),
        }
    }
}

/// Rebuild a URI with a new path and query, keeping scheme and authority
pub(crate) fn replace_path_and_query(uri: &Uri, path_and_query: &str) -> Option<Uri> {
    let path_and_query: PathAndQuery = path_and_query.parse().ok()?;
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts).ok()
}
