//! Header version writer

use super::ApiVersionWriter;
use crate::request::{OutgoingRequest, ResponseLike};
use crate::version::ApiVersion;

/// Adds a version header when it is absent
#[derive(Debug, Clone)]
pub struct HeaderApiVersionWriter {
    header_name: String,
}

impl HeaderApiVersionWriter {
    /// Writer for the given header name
    pub fn new(header_name: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
        }
    }
}

impl ApiVersionWriter for HeaderApiVersionWriter {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        request
            .headers_mut()
            .write_header_if_absent(&self.header_name, &version.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    #[test]
    fn test_adds_missing_header() {
        let mut request = Request::get("/").body(()).unwrap();
        HeaderApiVersionWriter::new("api-version").write(&mut request, &ApiVersion::new(2, 0));

        assert_eq!(request.headers()["api-version"], "2.0");
    }

    #[test]
    fn test_keeps_existing_header() {
        let mut request = Request::get("/").header("API-Version", "1.0").body(()).unwrap();
        HeaderApiVersionWriter::new("api-version").write(&mut request, &ApiVersion::new(2, 0));

        let values: Vec<_> = request.headers().get_all("api-version").iter().collect();
        assert_eq!(values, vec!["1.0"]);
    }
}
