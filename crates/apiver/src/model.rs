//! Per-endpoint version metadata

use crate::version::ApiVersion;
use serde::Serialize;

/// Versions an endpoint declares, implements and advertises
///
/// Built once at startup (usually through
/// [`ApiVersionConventionBuilder`](crate::conventions::ApiVersionConventionBuilder))
/// and only read afterwards. Every list is sorted ascending without
/// duplicates.
///
/// A version-neutral model is an explicit state: it has no versions at all
/// and matches every request, which is different from a model that simply
/// declares nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersionModel {
    is_api_version_neutral: bool,
    declared_versions: Vec<ApiVersion>,
    supported_versions: Vec<ApiVersion>,
    deprecated_versions: Vec<ApiVersion>,
    advertised_versions: Vec<ApiVersion>,
    deprecated_advertised_versions: Vec<ApiVersion>,
    implemented_versions: Vec<ApiVersion>,
}

fn normalize(mut versions: Vec<ApiVersion>) -> Vec<ApiVersion> {
    versions.retain(|version| !version.is_neutral());
    versions.sort();
    versions.dedup();
    versions
}

fn union(a: &[ApiVersion], b: &[ApiVersion]) -> Vec<ApiVersion> {
    normalize(a.iter().chain(b).cloned().collect())
}

impl ApiVersionModel {
    /// Model for an endpoint that opts out of versioning
    pub fn neutral() -> Self {
        Self {
            is_api_version_neutral: true,
            ..Self::default()
        }
    }

    /// Model with no versions that is not neutral
    pub fn empty() -> Self {
        Self::default()
    }

    /// Model implementing only the given default version
    pub fn from_default(version: ApiVersion) -> Self {
        Self::new(vec![version.clone()], vec![version], Vec::new(), Vec::new(), Vec::new())
    }

    /// Model built from explicit sets
    ///
    /// Declared versions must be implemented; any that are not are dropped.
    /// `declared` falls back to the implemented versions when empty.
    pub fn new(
        declared: Vec<ApiVersion>,
        supported: Vec<ApiVersion>,
        deprecated: Vec<ApiVersion>,
        advertised: Vec<ApiVersion>,
        deprecated_advertised: Vec<ApiVersion>,
    ) -> Self {
        let supported = normalize(supported);
        let deprecated = normalize(deprecated);
        let implemented = union(&supported, &deprecated);
        let mut declared = normalize(declared);
        declared.retain(|version| {
            let found = implemented.binary_search(version).is_ok();
            if !found {
                tracing::debug!(version = %version, "Dropping declared API version that is not implemented");
            }
            found
        });
        let declared = if declared.is_empty() {
            implemented.clone()
        } else {
            declared
        };

        Self {
            is_api_version_neutral: false,
            declared_versions: declared,
            supported_versions: supported,
            deprecated_versions: deprecated,
            advertised_versions: normalize(advertised),
            deprecated_advertised_versions: normalize(deprecated_advertised),
            implemented_versions: implemented,
        }
    }

    /// Whether version matching is bypassed for this endpoint
    pub fn is_api_version_neutral(&self) -> bool {
        self.is_api_version_neutral
    }

    /// Versions the endpoint explicitly maps to
    pub fn declared_versions(&self) -> &[ApiVersion] {
        &self.declared_versions
    }

    /// Implemented versions that are not deprecated
    pub fn supported_versions(&self) -> &[ApiVersion] {
        &self.supported_versions
    }

    /// Implemented versions clients should migrate away from
    pub fn deprecated_versions(&self) -> &[ApiVersion] {
        &self.deprecated_versions
    }

    /// Versions mentioned for discovery but implemented elsewhere
    pub fn advertised_versions(&self) -> &[ApiVersion] {
        &self.advertised_versions
    }

    /// Deprecated versions mentioned for discovery but implemented elsewhere
    pub fn deprecated_advertised_versions(&self) -> &[ApiVersion] {
        &self.deprecated_advertised_versions
    }

    /// Supported and deprecated versions together
    pub fn implemented_versions(&self) -> &[ApiVersion] {
        &self.implemented_versions
    }

    /// Whether the endpoint has no versions and is not neutral
    pub fn is_empty(&self) -> bool {
        !self.is_api_version_neutral && self.implemented_versions.is_empty()
    }

    /// Whether a request for `version` can be served
    pub fn implements(&self, version: &ApiVersion) -> bool {
        self.is_api_version_neutral || self.implemented_versions.binary_search(version).is_ok()
    }

    /// Whether `version` is deprecated and not also supported
    pub fn is_deprecated(&self, version: &ApiVersion) -> bool {
        self.deprecated_versions.binary_search(version).is_ok()
            && self.supported_versions.binary_search(version).is_err()
    }

    /// Versions to report as supported: supported plus advertised
    pub fn reported_supported_versions(&self) -> Vec<ApiVersion> {
        union(&self.supported_versions, &self.advertised_versions)
    }

    /// Versions to report as deprecated, excluding any that are also supported
    pub fn reported_deprecated_versions(&self) -> Vec<ApiVersion> {
        let supported = self.reported_supported_versions();
        union(&self.deprecated_versions, &self.deprecated_advertised_versions)
            .into_iter()
            .filter(|version| supported.binary_search(version).is_err())
            .collect()
    }

    /// Merge several models, e.g. every endpoint sharing one route
    ///
    /// Neutral models contribute no versions. The result is neutral only when
    /// every input is neutral; no input gives an empty model.
    pub fn aggregate<'a, I>(models: I) -> Self
    where
        I: IntoIterator<Item = &'a ApiVersionModel>,
    {
        let mut any = false;
        let mut all_neutral = true;
        let mut merged = Self::default();

        for model in models {
            any = true;
            if model.is_api_version_neutral {
                continue;
            }
            all_neutral = false;
            merged.declared_versions.extend_from_slice(&model.declared_versions);
            merged.supported_versions.extend_from_slice(&model.supported_versions);
            merged.deprecated_versions.extend_from_slice(&model.deprecated_versions);
            merged.advertised_versions.extend_from_slice(&model.advertised_versions);
            merged
                .deprecated_advertised_versions
                .extend_from_slice(&model.deprecated_advertised_versions);
        }

        if any && all_neutral {
            return Self::neutral();
        }

        Self::new(
            merged.declared_versions,
            merged.supported_versions,
            merged.deprecated_versions,
            merged.advertised_versions,
            merged.deprecated_advertised_versions,
        )
    }
}
