//! Mock [`CatalogueSource`] for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::port::{CatalogueSnapshot, CatalogueSource};

/// A source that replays a fixed queue of fetch results.
///
/// Each `fetch()` pops the next result; once the queue is exhausted every
/// call fails with [`SourceError::Unavailable`].
pub struct ScriptedSource {
    results: Mutex<VecDeque<Result<CatalogueSnapshot, SourceError>>>,
    delay: Option<Duration>,
    fetch_count: Arc<AtomicU32>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            delay: None,
            fetch_count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_results(self, results: Vec<Result<CatalogueSnapshot, SourceError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            ..self
        }
    }

    /// Sleep this long inside every fetch before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared counter for asserting how often the source was hit.
    pub fn counter(&self) -> Arc<AtomicU32> {
        self.fetch_count.clone()
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogueSource for ScriptedSource {
    async fn fetch(&self) -> Result<CatalogueSnapshot, SourceError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let next = self
            .results
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        next.unwrap_or_else(|| Err(SourceError::Unavailable("script exhausted".into())))
    }

    fn source_name(&self) -> &'static str {
        "Scripted"
    }
}
