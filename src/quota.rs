/*!
 * Character quota gate for translation requests.
 *
 * DeepL bills and limits by character volume, so the document's translatable
 * character count is classified against the configured limit before any
 * remote call is made. The provider remains the authority; this gate is a
 * local pre-check estimate.
 */

use crate::subtitle_processor::SubtitleDocument;

/// Character limit of the DeepL free tier, used when no limit is configured
pub const DEFAULT_CHARACTER_LIMIT: u64 = 500_000;

/// Outcome of classifying a document against a character limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaVerdict {
    /// The document contains no translatable text
    Empty,
    /// The document fits within the limit
    Ok,
    /// The document exceeds the limit
    Exceeded,
}

/// Derived quota standing of one document; recomputed whenever the document
/// changes, never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    /// Translatable characters in the document
    pub total_chars: u64,
    /// Configured character limit
    pub limit: u64,
    /// Classification of `total_chars` against `limit`
    pub verdict: QuotaVerdict,
}

impl QuotaStatus {
    /// Classify a document's character volume against a limit
    pub fn classify(document: &SubtitleDocument, limit: u64) -> Self {
        let total_chars = document.char_count();
        let verdict = if total_chars == 0 {
            QuotaVerdict::Empty
        } else if total_chars > limit {
            QuotaVerdict::Exceeded
        } else {
            QuotaVerdict::Ok
        };
        QuotaStatus { total_chars, limit, verdict }
    }

    /// Whether a translation may proceed under this status
    pub fn allows_translation(&self) -> bool {
        self.verdict == QuotaVerdict::Ok
    }
}

impl std::fmt::Display for QuotaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} characters", self.total_chars, self.limit)
    }
}
