//! Where the records come from.

use std::cell::RefCell;
use std::collections::HashMap;

use log::debug;

use crate::config::{CandidateRecord, ResultsError};

/// Loads all the records of a named resource.
///
/// Implementations may fetch the resource again on every call.
pub trait RecordSource {
    fn load(&self, resource_id: &str) -> Result<Vec<CandidateRecord>, ResultsError>;
}

/// Records held in memory, keyed by resource id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<String, Vec<CandidateRecord>>,
}

impl MemorySource {
    pub fn new() -> MemorySource {
        MemorySource::default()
    }

    pub fn with_resource(mut self, resource_id: &str, records: Vec<CandidateRecord>) -> Self {
        self.resources.insert(resource_id.to_string(), records);
        self
    }
}

impl RecordSource for MemorySource {
    fn load(&self, resource_id: &str) -> Result<Vec<CandidateRecord>, ResultsError> {
        self.resources
            .get(resource_id)
            .cloned()
            .ok_or_else(|| ResultsError::DataUnavailable {
                resource: resource_id.to_string(),
                reason: "unknown resource".to_string(),
            })
    }
}

/// Memoises the successful loads of another source.
///
/// Failures are not cached, so a later call retries the inner source.
pub struct CachedSource<S: RecordSource> {
    inner: S,
    cache: RefCell<HashMap<String, Vec<CandidateRecord>>>,
}

impl<S: RecordSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        CachedSource {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RecordSource> RecordSource for CachedSource<S> {
    fn load(&self, resource_id: &str) -> Result<Vec<CandidateRecord>, ResultsError> {
        if let Some(records) = self.cache.borrow().get(resource_id) {
            debug!("CachedSource: hit for {:?}", resource_id);
            return Ok(records.clone());
        }
        let records = self.inner.load(resource_id)?;
        self.cache
            .borrow_mut()
            .insert(resource_id.to_string(), records.clone());
        Ok(records)
    }
}
