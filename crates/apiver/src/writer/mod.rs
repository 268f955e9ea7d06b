//! API version writers
//!
//! Writers put a version into an outgoing request, for clients calling a
//! versioned service. They never overwrite a version that is already there.

mod composite;
mod header;
mod media_type;
mod query;
mod url_segment;

pub use composite::CompositeApiVersionWriter;
pub use header::HeaderApiVersionWriter;
pub use media_type::MediaTypeApiVersionWriter;
pub use query::QueryStringApiVersionWriter;
pub use url_segment::UrlSegmentApiVersionWriter;

use crate::request::OutgoingRequest;
use crate::version::ApiVersion;
use std::sync::Arc;

/// Default placeholder replaced by [`UrlSegmentApiVersionWriter`]
pub const DEFAULT_URL_TOKEN: &str = "{version}";

/// Writes a version into an outgoing request
pub trait ApiVersionWriter: Send + Sync {
    /// Add the version unless the request already carries one
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion);
}

impl<W: ApiVersionWriter + ?Sized> ApiVersionWriter for Arc<W> {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        (**self).write(request, version)
    }
}

impl<W: ApiVersionWriter + ?Sized> ApiVersionWriter for Box<W> {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        (**self).write(request, version)
    }
}
