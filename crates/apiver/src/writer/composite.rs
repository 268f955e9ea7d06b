//! Combination of several version writers

use super::ApiVersionWriter;
use crate::request::OutgoingRequest;
use crate::version::ApiVersion;
use std::fmt;
use std::sync::Arc;

/// Applies several writers to the same request, in order
#[derive(Clone, Default)]
pub struct CompositeApiVersionWriter {
    writers: Vec<Arc<dyn ApiVersionWriter>>,
}

impl CompositeApiVersionWriter {
    /// Create an empty composite
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a writer
    pub fn with<W: ApiVersionWriter + 'static>(mut self, writer: W) -> Self {
        self.writers.push(Arc::new(writer));
        self
    }
}

impl fmt::Debug for CompositeApiVersionWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeApiVersionWriter")
            .field("writers", &self.writers.len())
            .finish()
    }
}

impl ApiVersionWriter for CompositeApiVersionWriter {
    fn write(&self, request: &mut dyn OutgoingRequest, version: &ApiVersion) {
        for writer in &self.writers {
            writer.write(request, version);
        }
    }
}
