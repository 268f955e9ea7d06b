//! API version negotiation for HTTP services
//!
//! This crate implements the framework-independent core of API versioning:
//!
//! - Version values with group dates, major/minor numbers and status labels
//! - Readers for query strings, headers, media type parameters and URL segments
//! - Ambiguity resolution across every place a version may be sent
//! - Selection of a version when the client did not ask for one
//! - Writers that put a version into outgoing client requests
//! - Reporting of supported and deprecated versions in response headers
//!
//! Hosts plug in through the narrow traits in [`request`]; implementations
//! for the `http` crate's request and response types are included.
//!
//! # Usage
//!
//! ```rust,ignore
//! use apiver::prelude::*;
//!
//! let options = ApiVersioningOptions::new()
//!     .reader(QueryStringApiVersionReader::default().combine(HeaderApiVersionReader::new(["api-version"])))
//!     .assume_default_version_when_unspecified(true)
//!     .report_api_versions(true);
//! let negotiator = ApiVersionNegotiator::new(options);
//!
//! let models = ApiVersionConventions::new()
//!     .endpoint("orders", |e: ApiVersionConventionBuilder| e.has_api_version(ApiVersion::new(2, 0)))
//!     .build(negotiator.options())?;
//!
//! match negotiator.negotiate(&request, &models["orders"]) {
//!     Ok(negotiated) => { /* dispatch on negotiated.version() */ }
//!     Err(err) => { /* answer err.status_code() with err.to_response() */ }
//! }
//! negotiator.report(&mut response, &models["orders"]);
//! ```

pub mod candidates;
pub mod conventions;
pub mod description;
pub mod error;
mod media_type;
pub mod model;
pub mod negotiation;
pub mod options;
pub mod parser;
pub mod reader;
pub mod reporting;
pub mod request;
pub mod resolver;
pub mod selector;
pub mod version;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{ErrorCode, ErrorResponse, Result, VersioningError};
pub use model::ApiVersionModel;
pub use negotiation::{ApiVersionNegotiator, NegotiatedApiVersion, VersionSource};
pub use options::{ApiVersioningOptions, VersioningSettings};
pub use version::{ApiVersion, ApiVersionFormat, ConstructionError, VersionParseError};

/// Commonly used types
pub mod prelude {
    pub use crate::candidates::CandidateSet;
    pub use crate::conventions::{
        ApiVersionConvention, ApiVersionConventionBuilder, ApiVersionConventions,
    };
    pub use crate::description::{ApiVersionParameterDescriptions, ParameterLocation};
    pub use crate::error::{Result, VersioningError};
    pub use crate::model::ApiVersionModel;
    pub use crate::negotiation::{ApiVersionNegotiator, NegotiatedApiVersion, VersionSource};
    pub use crate::options::{ApiVersioningOptions, SelectorPolicy, VersioningSettings};
    pub use crate::parser::{ApiVersionParser, DefaultApiVersionParser};
    pub use crate::reader::{
        ApiVersionReader, ApiVersionReaderExt, CompositeApiVersionReader, HeaderApiVersionReader,
        MediaTypeApiVersionReader, QueryStringApiVersionReader, UrlSegmentApiVersionReader,
    };
    pub use crate::reporting::{ApiVersionReporter, DefaultApiVersionReporter};
    pub use crate::request::{OutgoingRequest, RequestLike, ResponseLike, RouteValues};
    pub use crate::resolver::{resolve, RequestedApiVersion};
    pub use crate::selector::{
        ApiVersionSelector, ConstantApiVersionSelector, CurrentImplementationApiVersionSelector,
        LowestImplementedApiVersionSelector,
    };
    pub use crate::version::{ApiVersion, ApiVersionFormat};
    pub use crate::writer::{
        ApiVersionWriter, CompositeApiVersionWriter, HeaderApiVersionWriter,
        MediaTypeApiVersionWriter, QueryStringApiVersionWriter, UrlSegmentApiVersionWriter,
    };
}
