//! Version parameter descriptions for API documentation
//!
//! Readers describe where they look for a version independently of reading
//! any request, so documentation generators can list the parameters.

use serde::Serialize;

/// Where a version parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Query string parameter
    Query,
    /// Request header
    Header,
    /// URL path segment
    Path,
    /// Media type parameter of `Accept` / `Content-Type`
    MediaTypeParameter,
}

/// One documented version parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescription {
    /// Parameter name
    pub name: String,
    /// Parameter location
    pub location: ParameterLocation,
}

/// Sink that readers report their parameters to
pub trait ParameterDescriptionContext {
    /// Record a parameter
    fn add_parameter(&mut self, name: &str, location: ParameterLocation);
}

/// Collected parameter descriptions, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiVersionParameterDescriptions {
    parameters: Vec<ParameterDescription>,
}

impl ApiVersionParameterDescriptions {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected parameters in the order they were reported
    pub fn parameters(&self) -> &[ParameterDescription] {
        &self.parameters
    }

    /// Parameters reported for one location
    pub fn at(&self, location: ParameterLocation) -> impl Iterator<Item = &ParameterDescription> {
        self.parameters.iter().filter(move |p| p.location == location)
    }
}

impl ParameterDescriptionContext for ApiVersionParameterDescriptions {
    fn add_parameter(&mut self, name: &str, location: ParameterLocation) {
        let exists = self
            .parameters
            .iter()
            .any(|p| p.location == location && p.name.eq_ignore_ascii_case(name));
        if !exists {
            self.parameters.push(ParameterDescription {
                name: name.to_string(),
                location,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_are_collapsed() {
        let mut descriptions = ApiVersionParameterDescriptions::new();
        descriptions.add_parameter("api-version", ParameterLocation::Query);
        descriptions.add_parameter("API-Version", ParameterLocation::Query);
        descriptions.add_parameter("api-version", ParameterLocation::Header);

        assert_eq!(descriptions.parameters().len(), 2);
        assert_eq!(descriptions.at(ParameterLocation::Header).count(), 1);
    }

    #[test]
    fn test_serializes_locations_in_camel_case() {
        let mut descriptions = ApiVersionParameterDescriptions::new();
        descriptions.add_parameter("v", ParameterLocation::MediaTypeParameter);

        let json = serde_json::to_value(&descriptions).unwrap();
        assert_eq!(json["parameters"][0]["location"], "mediaTypeParameter");
    }
}
