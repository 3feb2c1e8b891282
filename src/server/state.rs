use crate::ai::PlantIdentifier;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Chosen once at startup; immutable afterwards.
    pub identifier: Arc<dyn PlantIdentifier>,
    /// Upper bound on reading the upload plus identifying it.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(identifier: Arc<dyn PlantIdentifier>) -> Self {
        Self {
            identifier,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
