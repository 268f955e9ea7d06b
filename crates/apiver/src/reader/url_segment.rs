//! URL segment version reader

use super::{ApiVersionReader, DEFAULT_ROUTE_PARAMETER};
use crate::description::{ParameterDescriptionContext, ParameterLocation};
use crate::request::RequestLike;
use std::cell::Cell;

thread_local! {
    static READING: Cell<bool> = const { Cell::new(false) };
}

/// Clears the re-entrancy flag when the outermost read finishes
struct ReadingGuard;

impl Drop for ReadingGuard {
    fn drop(&mut self) {
        READING.with(|reading| reading.set(false));
    }
}

/// Reads the version captured by route matching, e.g. `/v{version}/orders`
///
/// The URL is not parsed again; the host supplies the matched value through
/// [`RequestLike::route_value`]. If route matching itself triggers version
/// resolution on the same thread, the nested read returns nothing instead of
/// recursing.
#[derive(Debug, Clone)]
pub struct UrlSegmentApiVersionReader {
    route_parameter: String,
}

impl UrlSegmentApiVersionReader {
    /// Reader for the given route parameter
    pub fn new(route_parameter: impl Into<String>) -> Self {
        Self {
            route_parameter: route_parameter.into(),
        }
    }

    /// Configured route parameter
    pub fn route_parameter(&self) -> &str {
        &self.route_parameter
    }
}

impl Default for UrlSegmentApiVersionReader {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_PARAMETER)
    }
}

impl ApiVersionReader for UrlSegmentApiVersionReader {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        if READING.with(|reading| reading.replace(true)) {
            tracing::debug!(
                parameter = %self.route_parameter,
                "Skipping nested URL segment version read"
            );
            return Vec::new();
        }
        let _guard = ReadingGuard;

        match request.route_value(&self.route_parameter) {
            Some(value) if !value.trim().is_empty() => {
                tracing::debug!(parameter = %self.route_parameter, value = value.trim(), "Read API version from route");
                vec![value.trim().to_string()]
            }
            _ => Vec::new(),
        }
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        context.add_parameter(&self.route_parameter, ParameterLocation::Path);
    }
}
