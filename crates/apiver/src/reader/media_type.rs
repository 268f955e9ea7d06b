//! Media type parameter version reader

use super::{ApiVersionReader, DEFAULT_MEDIA_TYPE_PARAMETER};
use crate::candidates::CandidateSet;
use crate::description::{ParameterDescriptionContext, ParameterLocation};
use crate::media_type::{sort_by_quality, MediaType};
use crate::request::RequestLike;

/// Reads versions from a media type parameter, e.g. `application/json;v=2.0`
///
/// The `Content-Type` parameter is a candidate. Among `Accept` entries that
/// carry the parameter, the values of the highest-quality entries are
/// candidates. When the two disagree both are returned and the resolver
/// reports the conflict.
#[derive(Debug, Clone)]
pub struct MediaTypeApiVersionReader {
    parameter_name: String,
}

impl MediaTypeApiVersionReader {
    /// Reader for the given media type parameter
    pub fn new(parameter_name: impl Into<String>) -> Self {
        let parameter_name = parameter_name.into();
        let parameter_name = if parameter_name.trim().is_empty() {
            DEFAULT_MEDIA_TYPE_PARAMETER.to_string()
        } else {
            parameter_name
        };
        Self { parameter_name }
    }

    /// Configured parameter name
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    fn read_accept(&self, request: &dyn RequestLike, candidates: &mut CandidateSet) {
        let mut entries: Vec<MediaType> = request
            .accept()
            .into_iter()
            .flat_map(MediaType::parse_list)
            .filter(|entry| entry.param(&self.parameter_name).is_some())
            .collect();

        sort_by_quality(&mut entries);

        let Some(best) = entries.first().map(MediaType::quality) else {
            return;
        };

        candidates.extend(
            entries
                .iter()
                .take_while(|entry| entry.quality() >= best)
                .filter_map(|entry| entry.param(&self.parameter_name)),
        );
    }
}

impl Default for MediaTypeApiVersionReader {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_TYPE_PARAMETER)
    }
}

impl ApiVersionReader for MediaTypeApiVersionReader {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        let mut candidates = CandidateSet::new();

        if let Some(version) = request
            .content_type()
            .and_then(MediaType::parse)
            .and_then(|media_type| media_type.param(&self.parameter_name).map(str::to_string))
        {
            candidates.insert(&version);
        }

        self.read_accept(request, &mut candidates);

        let values = candidates.into_vec();
        if !values.is_empty() {
            tracing::debug!(parameter = %self.parameter_name, values = ?values, "Read API version from media type");
        }
        values
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        context.add_parameter(&self.parameter_name, ParameterLocation::MediaTypeParameter);
    }
}
