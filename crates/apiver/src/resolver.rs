//! Reduction of raw candidates to at most one requested version

use crate::candidates::CandidateSet;
use crate::error::{Result, VersioningError};

/// Outcome of resolving the raw candidates of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedApiVersion {
    /// The client did not ask for a version
    Unspecified,
    /// The client asked for exactly one version (raw, unparsed text)
    Requested(String),
}

impl RequestedApiVersion {
    /// The raw requested text, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Unspecified => None,
            Self::Requested(text) => Some(text),
        }
    }
}

/// Resolve raw candidates gathered from one or more readers
///
/// Repeats of the same value (ignoring case) collapse into one; two or more
/// distinct values are an ambiguity error listing every distinct value.
pub fn resolve<'a, I>(candidates: I) -> Result<RequestedApiVersion>
where
    I: IntoIterator<Item = &'a str>,
{
    let set: CandidateSet = candidates.into_iter().collect();

    match set.len() {
        0 => Ok(RequestedApiVersion::Unspecified),
        1 => Ok(set
            .into_iter()
            .next()
            .map(RequestedApiVersion::Requested)
            .unwrap_or(RequestedApiVersion::Unspecified)),
        _ => {
            let candidates = set.into_vec();
            tracing::warn!(candidates = ?candidates, "Ambiguous API version requested");
            Err(VersioningError::ambiguous(candidates))
        }
    }
}
