//! Fluent conventions that produce [`ApiVersionModel`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use apiver::conventions::ApiVersionConventions;
//! use apiver::ApiVersion;
//!
//! let conventions = ApiVersionConventions::new()
//!     .endpoint("orders", |e| {
//!         e.has_api_version(ApiVersion::new(2, 0))
//!             .has_deprecated_api_version(ApiVersion::new(1, 0))
//!     })
//!     .endpoint("health", |e| e.is_api_version_neutral());
//!
//! let models = conventions.build(&options)?;
//! ```

use crate::model::ApiVersionModel;
use crate::options::ApiVersioningOptions;
use crate::version::{ApiVersion, ConstructionError};
use std::collections::BTreeMap;

/// Source of version metadata for one endpoint
///
/// Closures, builders and host-specific metadata scanners all plug in here.
pub trait ApiVersionConvention {
    /// Add this convention's metadata to the builder
    fn apply(&self, builder: ApiVersionConventionBuilder) -> ApiVersionConventionBuilder;
}

impl<F> ApiVersionConvention for F
where
    F: Fn(ApiVersionConventionBuilder) -> ApiVersionConventionBuilder,
{
    fn apply(&self, builder: ApiVersionConventionBuilder) -> ApiVersionConventionBuilder {
        self(builder)
    }
}

/// Collects version metadata for one endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiVersionConventionBuilder {
    neutral: bool,
    supported: Vec<ApiVersion>,
    deprecated: Vec<ApiVersion>,
    advertised: Vec<ApiVersion>,
    deprecated_advertised: Vec<ApiVersion>,
    mapped: Vec<ApiVersion>,
}

impl ApiVersionConventionBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the endpoint as version-neutral
    pub fn is_api_version_neutral(mut self) -> Self {
        self.neutral = true;
        self
    }

    /// Implement a supported version
    pub fn has_api_version(mut self, version: ApiVersion) -> Self {
        self.supported.push(version);
        self
    }

    /// Implement several supported versions
    pub fn has_api_versions(mut self, versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        self.supported.extend(versions);
        self
    }

    /// Implement a deprecated version
    pub fn has_deprecated_api_version(mut self, version: ApiVersion) -> Self {
        self.deprecated.push(version);
        self
    }

    /// Advertise a version implemented elsewhere
    pub fn advertises_api_version(mut self, version: ApiVersion) -> Self {
        self.advertised.push(version);
        self
    }

    /// Advertise a deprecated version implemented elsewhere
    pub fn advertises_deprecated_api_version(mut self, version: ApiVersion) -> Self {
        self.deprecated_advertised.push(version);
        self
    }

    /// Restrict the endpoint to specific implemented versions
    pub fn map_to_api_version(mut self, version: ApiVersion) -> Self {
        self.mapped.push(version);
        self
    }

    /// Build the immutable model
    ///
    /// A neutral endpoint short-circuits to the neutral model. An endpoint
    /// that implements nothing gets `default_version` as its only supported
    /// version. Mapped versions must be implemented.
    pub fn build(&self, default_version: &ApiVersion) -> Result<ApiVersionModel, ConstructionError> {
        if self.neutral {
            return Ok(ApiVersionModel::neutral());
        }

        let supported = if self.supported.is_empty() && self.deprecated.is_empty() {
            vec![default_version.clone()]
        } else {
            self.supported.clone()
        };

        if let Some(missing) = self
            .mapped
            .iter()
            .find(|version| !supported.contains(version) && !self.deprecated.contains(version))
        {
            return Err(ConstructionError::NotImplemented(missing.to_string()));
        }

        Ok(ApiVersionModel::new(
            self.mapped.clone(),
            supported,
            self.deprecated.clone(),
            self.advertised.clone(),
            self.deprecated_advertised.clone(),
        ))
    }
}

impl ApiVersionConvention for ApiVersionConventionBuilder {
    fn apply(&self, mut builder: ApiVersionConventionBuilder) -> ApiVersionConventionBuilder {
        builder.neutral |= self.neutral;
        builder.supported.extend(self.supported.iter().cloned());
        builder.deprecated.extend(self.deprecated.iter().cloned());
        builder.advertised.extend(self.advertised.iter().cloned());
        builder
            .deprecated_advertised
            .extend(self.deprecated_advertised.iter().cloned());
        builder.mapped.extend(self.mapped.iter().cloned());
        builder
    }
}

/// Conventions for every endpoint of a service, keyed by endpoint name
#[derive(Debug, Clone, Default)]
pub struct ApiVersionConventions {
    endpoints: BTreeMap<String, ApiVersionConventionBuilder>,
}

impl ApiVersionConventions {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a convention to an endpoint
    ///
    /// Applying several conventions to the same endpoint merges them.
    pub fn endpoint(mut self, name: impl Into<String>, convention: impl ApiVersionConvention) -> Self {
        let name = name.into();
        let builder = self.endpoints.remove(&name).unwrap_or_default();
        self.endpoints.insert(name, convention.apply(builder));
        self
    }

    /// Build one model per endpoint
    pub fn build(
        &self,
        options: &ApiVersioningOptions,
    ) -> Result<BTreeMap<String, ApiVersionModel>, ConstructionError> {
        self.endpoints
            .iter()
            .map(|(name, builder)| {
                let model = builder.build(options.get_default_api_version())?;
                tracing::debug!(
                    endpoint = %name,
                    neutral = model.is_api_version_neutral(),
                    implemented = ?model.implemented_versions(),
                    "Built API version model"
                );
                Ok((name.clone(), model))
            })
            .collect()
    }
}
