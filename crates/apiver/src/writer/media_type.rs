//! Media type parameter version writer

use super::ApiVersionWriter;
use crate::media_type::MediaType;
use crate::reader::DEFAULT_MEDIA_TYPE_PARAMETER;
use crate::request::OutgoingRequest;
use crate::version::ApiVersion;
use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use http::HeaderMap;

/// Adds a version parameter to `Accept` entries and, for requests with a
/// body, to `Content-Type`
///
/// Entries that already carry the parameter are left unchanged.
#[derive(Debug, Clone)]
pub struct MediaTypeApiVersionWriter {
    parameter_name: String,
}

impl MediaTypeApiVersionWriter {
    /// Writer for the given parameter name
    pub fn new(parameter_name: impl Into<String>) -> Self {
        Self {
            parameter_name: parameter_name.into(),
        }
    }

    fn rewrite(&self, value: &str, version: &str) -> String {
        value
            .split(',')
            .filter_map(|raw| {
                let mut media_type = MediaType::parse(raw)?;
                if media_type.add_param(&self.parameter_name, version) {
                    Some(media_type.to_string())
                } else {
                    // already versioned entries keep their original spelling
                    Some(raw.trim().to_string())
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn rewrite_accept(&self, headers: &mut HeaderMap, version: &str) {
        let lines: Vec<String> = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(|value| self.rewrite(value, version))
            .collect();
        if lines.is_empty() {
            return;
        }

        let values: Result<Vec<HeaderValue>, _> =
            lines.iter().map(|line| HeaderValue::from_str(line)).collect();
        match values {
            Ok(values) => {
                headers.remove(ACCEPT);
                for value in values {
                    headers.append(ACCEPT, value);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Leaving Accept header unversioned"),
        }
    }

    fn rewrite_content_type(&self, headers: &mut HeaderMap, version: &str) {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return;
        };
        let Some(mut media_type) = MediaType::parse(content_type) else {
            return;
        };
        if !media_type.add_param(&self.parameter_name, version) {
            return;
        }

        match HeaderValue::from_str(&media_type.to_string()) {
            Ok(value) => {
                headers.insert(CONTENT_TYPE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Leaving Content-Type header unversioned"),
        }
    }
}

impl Default for MediaTypeApiVersionWriter {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_TYPE_PARAMETER)
    }
}

impl ApiVersionWriter for MediaTypeApiVersionWriter {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        let version = version.to_string();
        let carries_body = request.carries_body();
        let headers = request.headers_mut();

        self.rewrite_accept(headers, &version);
        if carries_body {
            self.rewrite_content_type(headers, &version);
        }
    }
}
