/*!
 * Translation provider clients.
 *
 * This module defines the capability interface the session talks to and the
 * client implementations behind it:
 * - DeepL: the DeepL REST API (free and pro endpoints)
 * - Mock: in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// One batch of texts to translate.
///
/// `texts` length always equals the cue count of the document being
/// translated, and order is significant: results are rejoined positionally,
/// there is no per-text identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    /// Texts to translate, in document order
    pub texts: Vec<String>,
    /// Source language code; None lets the provider detect it
    pub source_language: Option<String>,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new batch request
    pub fn new(texts: Vec<String>, source_language: Option<String>, target_language: String) -> Self {
        TranslationRequest { texts, source_language, target_language }
    }
}

/// Common trait for translation providers.
///
/// A `translate_batch` call is atomic from the caller's perspective: either
/// every text comes back translated, in order, or the call fails and nothing
/// is returned. Implementations may split the batch over several wire
/// requests, but partial results never leak to the caller.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate a batch of texts, preserving count and order
    ///
    /// # Arguments
    /// * `request` - The batch to translate
    ///
    /// # Returns
    /// * `Result<Vec<String>, ProviderError>` - Translated texts, positionally
    ///   matching `request.texts`, or the first error encountered
    async fn translate_batch(&self, request: &TranslationRequest)
        -> Result<Vec<String>, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider is reachable and the
    ///   credential is accepted
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

pub mod deepl;
pub mod mock;
