//! Narrow views of the host's requests and responses
//!
//! The negotiation core only ever talks to these traits. Implementations are
//! provided for the `http` crate's types; other hosts implement them on their
//! own request and response representations.

use http::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use http::{request, response, HeaderMap, Method, Request, Response, Uri};
use std::collections::HashMap;

/// Read-only view of an inbound request
///
/// References cannot be null, so a missing request is ruled out by the type
/// system rather than checked at runtime.
pub trait RequestLike {
    /// Raw query string, without the leading `?`
    fn query(&self) -> Option<&str>;

    /// Every value of the named header, in declaration order
    fn header_values(&self, name: &str) -> Vec<&str>;

    /// Every `Accept` header line
    fn accept(&self) -> Vec<&str> {
        self.header_values(ACCEPT.as_str())
    }

    /// The `Content-Type` header, if present
    fn content_type(&self) -> Option<&str> {
        self.header_values(CONTENT_TYPE.as_str()).into_iter().next()
    }

    /// Route value resolved by the host's route matching
    fn route_value(&self, name: &str) -> Option<&str>;
}

/// Write access to an outbound response's headers
pub trait ResponseLike {
    /// Whether the header is already present
    fn has_header(&self, name: &str) -> bool;

    /// Add the header unless it is already present
    ///
    /// Returns `true` when the header was written.
    fn write_header_if_absent(&mut self, name: &str, value: &str) -> bool;
}

/// Mutable view of an outgoing request, for version writers
pub trait OutgoingRequest {
    /// Request method
    fn method(&self) -> &Method;

    /// Request URI
    fn uri(&self) -> &Uri;

    /// Replace the request URI
    fn set_uri(&mut self, uri: Uri);

    /// Request headers
    fn headers(&self) -> &HeaderMap;

    /// Mutable request headers
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Whether the request carries a body
    ///
    /// A request carries a body when it declares a `Content-Type`, or when
    /// its method is `POST`, `PUT` or `PATCH`.
    fn carries_body(&self) -> bool {
        self.headers().contains_key(CONTENT_TYPE)
            || matches!(*self.method(), Method::POST | Method::PUT | Method::PATCH)
    }
}

/// Route values captured during route matching
///
/// Hosts insert this into the request extensions after matching a route so
/// the URL segment reader can pick up the version parameter.
#[derive(Debug, Clone, Default)]
pub struct RouteValues(HashMap<String, String>);

impl RouteValues {
    /// Create an empty set of route values
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Get a route value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn header_strs<'a>(headers: &'a HeaderMap, name: &str) -> Vec<&'a str> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect()
}

fn insert_if_absent(headers: &mut HeaderMap, name: &str, value: &str) -> bool {
    let (name, value) = match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
        (Ok(name), Ok(value)) => (name, value),
        _ => {
            tracing::warn!(header = name, value, "Skipping header that is not valid HTTP");
            return false;
        }
    };
    if headers.contains_key(&name) {
        return false;
    }
    headers.insert(name, value);
    true
}

impl<B> RequestLike for Request<B> {
    fn query(&self) -> Option<&str> {
        self.uri().query()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        header_strs(self.headers(), name)
    }

    fn route_value(&self, name: &str) -> Option<&str> {
        self.extensions().get::<RouteValues>()?.get(name)
    }
}

impl RequestLike for request::Parts {
    fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    fn header_values(&self, name: &str) -> Vec<&str> {
        header_strs(&self.headers, name)
    }

    fn route_value(&self, name: &str) -> Option<&str> {
        self.extensions.get::<RouteValues>()?.get(name)
    }
}

impl ResponseLike for HeaderMap {
    fn has_header(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn write_header_if_absent(&mut self, name: &str, value: &str) -> bool {
        insert_if_absent(self, name, value)
    }
}

impl<B> ResponseLike for Response<B> {
    fn has_header(&self, name: &str) -> bool {
        self.headers().contains_key(name)
    }

    fn write_header_if_absent(&mut self, name: &str, value: &str) -> bool {
        insert_if_absent(self.headers_mut(), name, value)
    }
}

impl ResponseLike for response::Parts {
    fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    fn write_header_if_absent(&mut self, name: &str, value: &str) -> bool {
        insert_if_absent(&mut self.headers, name, value)
    }
}

impl<B> OutgoingRequest for Request<B> {
    fn method(&self) -> &Method {
        Request::method(self)
    }

    fn uri(&self) -> &Uri {
        Request::uri(self)
    }

    fn set_uri(&mut self, uri: Uri) {
        *self.uri_mut() = uri;
    }

    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Request::headers_mut(self)
    }
}

impl OutgoingRequest for request::Parts {
    fn method(&self) -> &Method {
        &self.method
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }

    fn set_uri(&mut self, uri: Uri) {
        self.uri = uri;
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_views() {
        let mut request = Request::builder()
            .uri("/orders/7?api-version=1.0")
            .header("Accept", "application/json")
            .header("accept", "text/plain")
            .header("Content-Type", "application/json;v=2.0")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert([("version", "3.0")].into_iter().collect::<RouteValues>());

        assert_eq!(RequestLike::query(&request), Some("api-version=1.0"));
        assert_eq!(request.accept(), vec!["application/json", "text/plain"]);
        assert_eq!(request.content_type(), Some("application/json;v=2.0"));
        assert_eq!(request.route_value("version"), Some("3.0"));
        assert_eq!(request.route_value("other"), None);

        let (parts, _) = request.into_parts();
        assert_eq!(parts.header_values("ACCEPT").len(), 2);
        assert_eq!(parts.route_value("version"), Some("3.0"));
    }

    #[test]
    fn test_write_header_if_absent() {
        let mut headers = HeaderMap::new();

        assert!(headers.write_header_if_absent("api-supported-versions", "1.0"));
        assert!(!headers.write_header_if_absent("Api-Supported-Versions", "2.0"));
        assert_eq!(headers["api-supported-versions"], "1.0");
        assert!(!headers.write_header_if_absent("bad header", "1.0"));
    }

    #[test]
    fn test_carries_body() {
        let get = Request::get("/").body(()).unwrap();
        let post = Request::post("/").body(()).unwrap();
        let get_with_type = Request::get("/")
            .header("content-type", "application/json")
            .body(())
            .unwrap();

        assert!(!get.carries_body());
        assert!(post.carries_body());
        assert!(get_with_type.carries_body());
    }
}
