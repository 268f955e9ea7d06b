//! Query string version reader

use super::{names_or_default, ApiVersionReader, DEFAULT_QUERY_PARAMETER};
use crate::candidates::CandidateSet;
use crate::description::{ParameterDescriptionContext, ParameterLocation};
use crate::request::RequestLike;

/// Reads versions from query string parameters
///
/// Parameter names are matched without regard to case. Every non-empty value
/// is collected; distinct values come back sorted.
#[derive(Debug, Clone)]
pub struct QueryStringApiVersionReader {
    parameter_names: Vec<String>,
}

impl QueryStringApiVersionReader {
    /// Reader for the given parameter names
    ///
    /// Falls back to `api-version` when no usable name is given.
    pub fn new<I, S>(parameter_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameter_names: names_or_default(parameter_names, DEFAULT_QUERY_PARAMETER),
        }
    }

    /// Configured parameter names
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    fn is_version_parameter(&self, name: &str) -> bool {
        self.parameter_names
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}

impl Default for QueryStringApiVersionReader {
    fn default() -> Self {
        Self::new([DEFAULT_QUERY_PARAMETER])
    }
}

impl ApiVersionReader for QueryStringApiVersionReader {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        let Some(query) = request.query() else {
            return Vec::new();
        };

        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable query string");
                return Vec::new();
            }
        };

        let mut candidates = CandidateSet::new();
        candidates.extend(
            pairs
                .iter()
                .filter(|(name, _)| self.is_version_parameter(name))
                .map(|(_, value)| value.as_str()),
        );

        let values = candidates.into_vec();
        if !values.is_empty() {
            tracing::debug!(parameters = ?self.parameter_names, values = ?values, "Read API version from query string");
        }
        values
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        for name in &self.parameter_names {
            context.add_parameter(name, ParameterLocation::Query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn read(reader: &QueryStringApiVersionReader, uri: &str) -> Vec<String> {
        let request = Request::get(uri).body(()).unwrap();
        reader.read(&request)
    }

    #[test]
    fn test_reads_default_parameter() {
        let reader = QueryStringApiVersionReader::default();

        assert_eq!(read(&reader, "/orders?api-version=1.0"), vec!["1.0"]);
        assert_eq!(read(&reader, "/orders?API-VERSION=2.0&x=1"), vec!["2.0"]);
        assert!(read(&reader, "/orders").is_empty());
        assert!(read(&reader, "/orders?api-version=").is_empty());
        assert!(read(&reader, "/orders?version=1.0").is_empty());
    }

    #[test]
    fn test_duplicate_values_collapse() {
        let reader = QueryStringApiVersionReader::default();
        assert_eq!(
            read(&reader, "/orders?api-version=1.0&api-version=1.0"),
            vec!["1.0"]
        );
    }

    #[test]
    fn test_distinct_values_come_back_sorted() {
        let reader = QueryStringApiVersionReader::new(["api-version", "v"]);
        assert_eq!(
            read(&reader, "/orders?v=2.0&api-version=1.0-beta"),
            vec!["1.0-beta", "2.0"]
        );
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let reader = QueryStringApiVersionReader::default();
        assert_eq!(read(&reader, "/orders?api-version=1.0%2DBeta"), vec!["1.0-Beta"]);
    }

    #[test]
    fn test_blank_names_fall_back_to_default() {
        let reader = QueryStringApiVersionReader::new([" "]);
        assert_eq!(reader.parameter_names(), ["api-version"]);
    }
}
