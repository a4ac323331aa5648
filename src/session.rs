/*!
 * The subtitle translation session.
 *
 * A session owns at most one subtitle document at a time and walks it through
 * load, quota-gated translation, and serialization. Effectful operations take
 * `&mut self`, so a caller cannot start a second operation while one is in
 * flight; the session carries no internal locking.
 */

use log::{debug, info};

use crate::errors::{ProviderError, SessionError};
use crate::providers::{TranslationProvider, TranslationRequest};
use crate::quota::{DEFAULT_CHARACTER_LIMIT, QuotaStatus, QuotaVerdict};
use crate::subtitle_processor::SubtitleDocument;

/// Observable state of a session between operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No document loaded
    Idle,
    /// A document is loaded, translated or not
    Loaded,
}

/// State machine for one subtitle translation lifecycle.
///
/// The document is replaced wholesale by `load`, mutated (cue texts only) by
/// a successful `translate`, and read, never changed, by `serialize`. The
/// quota status is re-derived whenever the document changes and re-checked
/// immediately before every remote call.
pub struct TranslationSession {
    /// The current document, if one is loaded
    document: Option<SubtitleDocument>,

    /// Quota standing of the current document
    quota: Option<QuotaStatus>,

    /// Character limit the quota gate classifies against
    character_limit: u64,

    /// Installed translation client; absent until a credential is configured
    provider: Option<Box<dyn TranslationProvider>>,
}

impl TranslationSession {
    /// Create an idle session with the default character limit
    pub fn new() -> Self {
        Self::with_character_limit(DEFAULT_CHARACTER_LIMIT)
    }

    /// Create an idle session with a specific character limit
    pub fn with_character_limit(character_limit: u64) -> Self {
        TranslationSession {
            document: None,
            quota: None,
            character_limit,
            provider: None,
        }
    }

    /// Install the translation client built from the configured credential
    pub fn set_provider(&mut self, provider: Box<dyn TranslationProvider>) {
        self.provider = Some(provider);
    }

    /// Whether a translation client is installed
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        if self.document.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Idle
        }
    }

    /// The loaded document, if any
    pub fn document(&self) -> Option<&SubtitleDocument> {
        self.document.as_ref()
    }

    /// Quota standing of the loaded document, if any
    pub fn quota(&self) -> Option<QuotaStatus> {
        self.quota
    }

    /// The configured character limit
    pub fn character_limit(&self) -> u64 {
        self.character_limit
    }

    /// Load a document from raw SRT text, replacing any previous document.
    ///
    /// On a parse failure the previous document is already gone and the
    /// session is left idle.
    pub fn load(&mut self, raw: &str) -> Result<(), SessionError> {
        self.document = None;
        self.quota = None;

        let document = SubtitleDocument::parse(raw)?;
        debug!("Loaded {} cue(s), {} character(s)", document.len(), document.char_count());

        self.quota = Some(QuotaStatus::classify(&document, self.character_limit));
        self.document = Some(document);
        Ok(())
    }

    /// Translate every cue text in the loaded document.
    ///
    /// Preconditions are checked in order and the first failure wins: a
    /// document must be loaded, a provider installed, the quota verdict must
    /// be Ok (recomputed now, not at load time), and the target language must
    /// be non-empty. On success each cue's text is replaced positionally;
    /// timing and numbering are untouched. On any provider failure the
    /// document is exactly as it was before the call.
    pub async fn translate(
        &mut self,
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<(), SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        let provider = self.provider.as_deref().ok_or(SessionError::MissingCredential)?;

        let status = QuotaStatus::classify(document, self.character_limit);
        self.quota = Some(status);
        match status.verdict {
            QuotaVerdict::Empty => return Err(SessionError::EmptyDocument),
            QuotaVerdict::Exceeded => {
                return Err(SessionError::QuotaExceeded {
                    total_chars: status.total_chars,
                    limit: status.limit,
                });
            }
            QuotaVerdict::Ok => {}
        }

        if target_language.trim().is_empty() {
            return Err(SessionError::MissingTargetLanguage);
        }

        let request = TranslationRequest::new(
            document.texts(),
            source_language.map(str::to_string),
            target_language.to_string(),
        );
        let cue_count = request.texts.len();

        info!(
            "Translating {} cue(s) ({} characters) to {}",
            cue_count, status.total_chars, target_language
        );

        let translated = provider.translate_batch(&request).await?;

        if translated.len() != cue_count {
            return Err(SessionError::Provider(ProviderError::Parse(format!(
                "provider returned {} translation(s) for {} cue(s)",
                translated.len(),
                cue_count
            ))));
        }

        if let Some(document) = self.document.as_mut() {
            for (entry, text) in document.entries.iter_mut().zip(translated) {
                entry.text = text;
            }
        }
        if let Some(document) = self.document.as_ref() {
            self.quota = Some(QuotaStatus::classify(document, self.character_limit));
        }

        info!("Translation applied to {} cue(s)", cue_count);
        Ok(())
    }

    /// Serialize the loaded document back to SRT text.
    ///
    /// Valid as soon as a document is loaded, whether or not it has been
    /// translated.
    pub fn serialize(&self) -> Result<String, SessionError> {
        let document = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        Ok(document.to_srt_string()?)
    }
}

impl Default for TranslationSession {
    fn default() -> Self {
        Self::new()
    }
}
