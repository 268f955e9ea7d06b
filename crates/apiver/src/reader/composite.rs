//! Combination of several version readers

use super::ApiVersionReader;
use crate::description::ParameterDescriptionContext;
use crate::request::RequestLike;
use std::fmt;
use std::sync::Arc;

/// Runs several readers in a fixed order and concatenates their candidates
///
/// Duplicates across readers are left for the resolver, which collapses
/// repeats and rejects conflicts.
#[derive(Clone, Default)]
pub struct CompositeApiVersionReader {
    readers: Vec<Arc<dyn ApiVersionReader>>,
}

impl CompositeApiVersionReader {
    /// Create an empty composite
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reader
    pub fn with<R: ApiVersionReader + 'static>(mut self, reader: R) -> Self {
        self.readers.push(Arc::new(reader));
        self
    }

    /// Append a shared reader
    pub fn with_shared(mut self, reader: Arc<dyn ApiVersionReader>) -> Self {
        self.readers.push(reader);
        self
    }

    /// Number of combined readers
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    /// Whether no reader was added
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl fmt::Debug for CompositeApiVersionReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeApiVersionReader")
            .field("readers", &self.readers.len())
            .finish()
    }
}

impl FromIterator<Arc<dyn ApiVersionReader>> for CompositeApiVersionReader {
    fn from_iter<I: IntoIterator<Item = Arc<dyn ApiVersionReader>>>(iter: I) -> Self {
        Self {
            readers: iter.into_iter().collect(),
        }
    }
}

impl ApiVersionReader for CompositeApiVersionReader {
    fn read(&self, request: &dyn RequestLike) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|reader| reader.read(request))
            .collect()
    }

    fn describe(&self, context: &mut dyn ParameterDescriptionContext) {
        for reader in &self.readers {
            reader.describe(context);
        }
    }
}
