/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds, prefixing each text
 * - `MockProvider::failing(...)` - Always fails with the chosen error kind
 * - `MockProvider::miscounting()` - Succeeds but drops the last result
 * - `MockProvider::slow(...)` - Succeeds after an artificial delay
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{TranslationProvider, TranslationRequest};

/// Kind of error the mock should return when failing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockErrorKind {
    /// Invalid or missing API key
    Authentication,
    /// Provider-side quota exhausted
    Quota,
    /// Network failure reaching the provider
    Connection,
    /// Any other provider-reported error
    Api,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a marked translation
    Working,
    /// Always fails with an error of the given kind
    Failing(MockErrorKind),
    /// Succeeds but returns one result fewer than requested
    Miscounting,
    /// Succeeds after a delay (for timeout-adjacent testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate_batch calls made
    call_count: Arc<AtomicUsize>,
    /// Custom per-text transform (optional)
    transform: Option<fn(&str, &str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            transform: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing(kind: MockErrorKind) -> Self {
        Self::new(MockBehavior::Failing(kind))
    }

    /// Create a mock that returns too few results
    pub fn miscounting() -> Self {
        Self::new(MockBehavior::Miscounting)
    }

    /// Create a mock that succeeds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom transform applied to each text; receives the text and the
    /// target language
    pub fn with_transform(mut self, transform: fn(&str, &str) -> String) -> Self {
        self.transform = Some(transform);
        self
    }

    /// How many translate_batch calls this mock has served
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the shared call counter, for clones handed to a session
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }

    fn translate_text(&self, text: &str, target_language: &str) -> String {
        match self.transform {
            Some(transform) => transform(text, target_language),
            None => format!("[{}] {}", target_language, text),
        }
    }

    fn make_error(kind: MockErrorKind) -> ProviderError {
        match kind {
            MockErrorKind::Authentication => {
                ProviderError::AuthenticationFailed("Invalid API key".to_string())
            }
            MockErrorKind::Quota => {
                ProviderError::QuotaExceeded("Character limit reached".to_string())
            }
            MockErrorKind::Connection => {
                ProviderError::Connection("Connection refused".to_string())
            }
            MockErrorKind::Api => ProviderError::Api {
                status_code: 503,
                message: "Service unavailable".to_string(),
            },
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            transform: self.transform,
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate_batch(&self, request: &TranslationRequest)
        -> Result<Vec<String>, ProviderError>
    {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(request
                .texts
                .iter()
                .map(|text| self.translate_text(text, &request.target_language))
                .collect()),

            MockBehavior::Failing(kind) => Err(Self::make_error(kind)),

            MockBehavior::Miscounting => {
                let mut results: Vec<String> = request
                    .texts
                    .iter()
                    .map(|text| self.translate_text(text, &request.target_language))
                    .collect();
                results.pop();
                Ok(results)
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(request
                    .texts
                    .iter()
                    .map(|text| self.translate_text(text, &request.target_language))
                    .collect())
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing(kind) => Err(Self::make_error(kind)),
            _ => Ok(()),
        }
    }
}
