use crate::extractor::{ExtractionFailure, FileExtraction};
use crate::model::EndpointRecord;

/// Collects the per-file extraction results of a run, in the order they are added.
///
/// Nothing is deduplicated or reordered, so the output order is the file enumeration order
/// followed by the order the extractor produced within each file.
#[derive(Debug, Default)]
pub struct EndpointAggregator {
    endpoints: Vec<EndpointRecord>,
    failures: Vec<ExtractionFailure>,
}

impl EndpointAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, extraction: FileExtraction) {
        self.endpoints.extend(extraction.endpoints);
        self.failures.extend(extraction.failures);
    }

    pub fn endpoints(&self) -> &[EndpointRecord] {
        &self.endpoints
    }

    pub fn failures(&self) -> &[ExtractionFailure] {
        &self.failures
    }

    pub fn into_parts(self) -> (Vec<EndpointRecord>, Vec<ExtractionFailure>) {
        (self.endpoints, self.failures)
    }
}
