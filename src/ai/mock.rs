use super::PlantIdentifier;
use crate::models::{mock_identification, ImageInput, PlantIdentification};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Identifier that never leaves the process.
///
/// Serves the canned identification by default. Scripted responses are
/// returned in order and cycle once exhausted.
pub struct MockPlantIdentifier {
    responses: Vec<PlantIdentification>,
    failure: Option<String>,
    delay: Option<Duration>,
    call_count: AtomicUsize,
}

impl MockPlantIdentifier {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            failure: None,
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: PlantIdentification) -> Self {
        self.responses.push(response);
        self
    }

    /// Makes every call fail with an upstream error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockPlantIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlantIdentifier for MockPlantIdentifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn identify(&self, image: &ImageInput) -> Result<PlantIdentification> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            "Serving mock identification for {} byte upload",
            image.bytes.len()
        );

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(Error::AiProvider(message.clone()));
        }

        if self.responses.is_empty() {
            Ok(mock_identification())
        } else {
            let index = (count - 1) % self.responses.len();
            Ok(self.responses[index].clone())
        }
    }
}
