//! API version readers
//!
//! A reader pulls raw, unparsed version text out of one place in a request:
//!
//! - [`QueryStringApiVersionReader`]: `?api-version=1.0`
//! - [`HeaderApiVersionReader`]: `api-version: 1.0`
//! - [`MediaTypeApiVersionReader`]: `Accept: application/json;v=1.0`
//! - [`UrlSegmentApiVersionReader`]: `/v1.0/orders` (from the matched route)
//!
//! Readers never fail on a missing value; they return no candidates. Several
//! readers are combined with [`CompositeApiVersionReader`] and the result is
//! reduced to one requested version by [`resolve`](crate::resolver::resolve).
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver::reader::{ApiVersionReader, HeaderApiVersionReader, QueryStringApiVersionReader};
//!
//! let reader = QueryStringApiVersionReader::default()
//!     .combine(HeaderApiVersionReader::new(["api-version"]));
//! let requested = reader.read_version(&request)?;
//! ```

mod composite;
mod header;
mod media_type;
mod query;
mod url_segment;

pub use composite::CompositeApiVersionReader;
pub use header::HeaderApiVersionReader;
pub use media_type::MediaTypeApiVersionReader;
pub use query::QueryStringApiVersionReader;
pub use url_segment::UrlSegmentApiVersionReader;

use crate::description::ParameterDescriptionContext;
use crate::error::Result;
use crate::request::RequestLike;
use crate::resolver::{resolve, RequestedApiVersion};
use std::sync::Arc;

/// Default query string parameter name
pub const DEFAULT_QUERY_PARAMETER: &str = "api-version";

/// Default media type parameter name
pub const DEFAULT_MEDIA_TYPE_PARAMETER: &str = "v";

/// Default route parameter name for URL segment versioning
pub const DEFAULT_ROUTE_PARAMETER: &str = "version";

/// Reads raw version candidates from a request
pub trait ApiVersionReader: Send + Sync {
    /// Raw version strings found in the request, possibly empty
    fn read(&self, request: &dyn RequestLike) -> Vec<String>;

    /// Report the parameters this reader looks at
    fn describe(&self, context: &mut dyn ParameterDescriptionContext);

    /// Read and resolve to at most one requested version
    fn read_version(&self, request: &dyn RequestLike) -> Result<RequestedApiVersion> {
        let candidates = self.read(request);
        resolve(candidates.iter().map(String::as_str))
    }
}

impl<R: ApiVersionReader + ?Sized> ApiVersionReader for Arc<R> {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        (**self).read(request)
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        (**self).describe(context)
    }
}

impl<R: ApiVersionReader + ?Sized> ApiVersionReader for Box<R> {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        (**self).read(request)
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        (**self).describe(context)
    }
}

/// Chain another reader after this one
pub trait ApiVersionReaderExt: ApiVersionReader + Sized + 'static {
    /// Combine with another reader; candidates are concatenated in order
    fn combine<R: ApiVersionReader + 'static>(self, other: R) -> CompositeApiVersionReader {
        CompositeApiVersionReader::new().with(self).with(other)
    }
}

impl<R: ApiVersionReader + Sized + 'static> ApiVersionReaderExt for R {}

pub(crate) fn names_or_default<I, S>(names: I, default: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| !name.trim().is_empty())
        .collect();
    if names.is_empty() {
        vec![default.to_string()]
    } else {
        names
    }
}
