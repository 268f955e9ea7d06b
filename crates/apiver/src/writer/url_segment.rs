//! URL segment version writer

use super::query::replace_path_and_query;
use super::{ApiVersionWriter, DEFAULT_URL_TOKEN};
use crate::request::OutgoingRequest;
use crate::version::{ApiVersion, ApiVersionFormat};

/// Replaces a placeholder in the request path with the version
///
/// `/v{version}/orders` becomes `/v1.0/orders`. A percent-encoded placeholder
/// (`%7Bversion%7D`) is replaced too. Paths without the placeholder are left
/// unchanged.
#[derive(Debug, Clone)]
pub struct UrlSegmentApiVersionWriter {
    token: String,
    format: ApiVersionFormat,
}

impl UrlSegmentApiVersionWriter {
    /// Writer for the given placeholder
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            format: ApiVersionFormat::Full,
        }
    }

    /// Render the version with a specific format, e.g. major only
    pub fn format(mut self, format: ApiVersionFormat) -> Self {
        self.format = format;
        self
    }

    fn encoded_tokens(&self) -> [String; 3] {
        let upper = self.token.replace('{', "%7B").replace('}', "%7D");
        let lower = self.token.replace('{', "%7b").replace('}', "%7d");
        [self.token.clone(), upper, lower]
    }
}

impl Default for UrlSegmentApiVersionWriter {
    fn default() -> Self {
        Self::new(DEFAULT_URL_TOKEN)
    }
}

impl ApiVersionWriter for UrlSegmentApiVersionWriter {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        let uri = request.uri();
        let path = uri.path();
        let Some(token) = self
            .encoded_tokens()
            .into_iter()
            .find(|token| !token.is_empty() && path.contains(token.as_str()))
        else {
            return;
        };

        let mut path_and_query = path.replace(&token, &version.format(self.format));
        if let Some(query) = uri.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        match replace_path_and_query(uri, &path_and_query) {
            Some(uri) => request.set_uri(uri),
            None => tracing::warn!(path_and_query = %path_and_query, "Failed to rebuild request URI"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    #[test]
    fn test_replaces_placeholder() {
        let mut request = Request::get("/api/v%7Bversion%7D/orders?page=2").body(()).unwrap();
        UrlSegmentApiVersionWriter::default().write(&mut request, &ApiVersion::new(1, 0));

        assert_eq!(request.uri().to_string(), "/api/v1.0/orders?page=2");
    }

    #[test]
    fn test_major_only_format() {
        let mut request = Request::get("/v%7bversion%7d/orders").body(()).unwrap();
        UrlSegmentApiVersionWriter::default()
            .format(ApiVersionFormat::Major)
            .write(&mut request, &ApiVersion::new(2, 1));

        assert_eq!(request.uri().path(), "/v2/orders");
    }

    #[test]
    fn test_path_without_placeholder_is_unchanged() {
        let mut request = Request::get("/v3/orders").body(()).unwrap();
        UrlSegmentApiVersionWriter::default().write(&mut request, &ApiVersion::new(1, 0));

        assert_eq!(request.uri().path(), "/v3/orders");
    }
}
