//! Policies that pick a version when the client did not ask for one

use crate::model::ApiVersionModel;
use crate::request::RequestLike;
use crate::version::ApiVersion;

/// Picks the effective version for a request without an explicit version
///
/// Selection never fails: when the model offers nothing to choose from, the
/// configured fallback version is returned.
pub trait ApiVersionSelector: Send + Sync {
    /// Select the version to use for the request
    fn select_version(&self, request: &dyn RequestLike, model: &ApiVersionModel) -> ApiVersion;
}

/// Always selects the same version
#[derive(Debug, Clone)]
pub struct ConstantApiVersionSelector {
    version: ApiVersion,
}

impl ConstantApiVersionSelector {
    /// Selector returning `version`
    pub fn new(version: ApiVersion) -> Self {
        Self { version }
    }
}

impl ApiVersionSelector for ConstantApiVersionSelector {
    fn select_version(&self, _request: &dyn RequestLike, _model: &ApiVersionModel) -> ApiVersion {
        self.version.clone()
    }
}

/// Selects the highest implemented version
#[derive(Debug, Clone)]
pub struct CurrentImplementationApiVersionSelector {
    fallback: ApiVersion,
}

impl CurrentImplementationApiVersionSelector {
    /// Selector falling back to `fallback` when nothing is implemented
    pub fn new(fallback: ApiVersion) -> Self {
        Self { fallback }
    }
}

impl ApiVersionSelector for CurrentImplementationApiVersionSelector {
    fn select_version(&self, _request: &dyn RequestLike, model: &ApiVersionModel) -> ApiVersion {
        let selected = model
            .implemented_versions()
            .iter()
            .max()
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        tracing::debug!(version = %selected, "Selected current implemented API version");
        selected
    }
}

/// Selects the lowest implemented version
#[derive(Debug, Clone)]
pub struct LowestImplementedApiVersionSelector {
    fallback: ApiVersion,
}

impl LowestImplementedApiVersionSelector {
    /// Selector falling back to `fallback` when nothing is implemented
    pub fn new(fallback: ApiVersion) -> Self {
        Self { fallback }
    }
}

impl ApiVersionSelector for LowestImplementedApiVersionSelector {
    fn select_version(&self, _request: &dyn RequestLike, model: &ApiVersionModel) -> ApiVersion {
        let selected = model
            .implemented_versions()
            .iter()
            .min()
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        tracing::debug!(version = %selected, "Selected lowest implemented API version");
        selected
    }
}
