//! Header version reader

use super::ApiVersionReader;
use crate::candidates::CandidateSet;
use crate::description::{ParameterDescriptionContext, ParameterLocation};
use crate::request::RequestLike;

/// Reads versions from request headers
///
/// There is no default header name; common choices are `api-version` and
/// `x-ms-version`. Every non-empty header line is a candidate.
#[derive(Debug, Clone)]
pub struct HeaderApiVersionReader {
    header_names: Vec<String>,
}

impl HeaderApiVersionReader {
    /// Reader for the given header names
    pub fn new<I, S>(header_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header_names: header_names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.trim().is_empty())
                .collect(),
        }
    }

    /// Configured header names
    pub fn header_names(&self) -> &[String] {
        &self.header_names
    }
}

impl ApiVersionReader for HeaderApiVersionReader {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        let mut candidates = CandidateSet::new();
        for name in &self.header_names {
            candidates.extend(request.header_values(name));
        }

        let values = candidates.into_vec();
        if !values.is_empty() {
            tracing::debug!(headers = ?self.header_names, values = ?values, "Read API version from headers");
        }
        values
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        for name in &self.header_names {
            context.add_parameter(name, ParameterLocation::Header);
        }
    }
}
