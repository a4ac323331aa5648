/*!
 * Tests for the translation session state machine
 */

use subtran::errors::{ProviderError, SessionError, SubtitleError};
use subtran::providers::mock::{MockErrorKind, MockProvider};
use subtran::quota::QuotaVerdict;
use subtran::session::{SessionState, TranslationSession};

use crate::common;

fn loaded_session(raw: &str) -> TranslationSession {
    let mut session = TranslationSession::new();
    session.load(raw).unwrap();
    session
}

#[test]
fn test_newSession_shouldBeIdleWithoutDocument() {
    let session = TranslationSession::new();

    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.document().is_none());
    assert!(session.quota().is_none());
    assert!(!session.has_provider());
}

#[test]
fn test_serialize_withoutDocument_shouldFailWithNoDocument() {
    let session = TranslationSession::new();
    assert!(matches!(session.serialize(), Err(SessionError::NoDocument)));
}

#[test]
fn test_load_withValidSrt_shouldTransitionToLoaded() {
    let session = loaded_session(common::SAMPLE_SRT);

    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.document().unwrap().len(), 3);
    assert_eq!(session.quota().unwrap().verdict, QuotaVerdict::Ok);
}

#[test]
fn test_load_withMalformedSrt_shouldLeaveSessionIdle() {
    let mut session = TranslationSession::new();

    let result = session.load("not a subtitle file");

    assert!(matches!(
        result,
        Err(SessionError::Subtitle(SubtitleError::Malformed { .. }))
    ));
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_load_withMalformedSrtAfterValidLoad_shouldDiscardPreviousDocument() {
    let mut session = loaded_session(common::SAMPLE_SRT);

    let result = session.load("garbage");

    assert!(result.is_err());
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.document().is_none());
    assert!(session.quota().is_none());
}

#[test]
fn test_load_withEmptyInput_shouldBeLoadedButEmpty() {
    let session = loaded_session("");

    // Zero cues is a valid document, distinct from no document at all
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.quota().unwrap().verdict, QuotaVerdict::Empty);
}

#[tokio::test]
async fn test_translate_withoutDocument_shouldFailWithNoDocumentFirst() {
    // Neither a document nor a provider: NoDocument wins, preconditions are
    // checked in order
    let mut session = TranslationSession::new();

    let result = session.translate(None, "fr").await;

    assert!(matches!(result, Err(SessionError::NoDocument)));
}

#[tokio::test]
async fn test_translate_withoutProvider_shouldFailWithMissingCredential() {
    let mut session = loaded_session(common::SAMPLE_SRT);

    let result = session.translate(None, "fr").await;

    assert!(matches!(result, Err(SessionError::MissingCredential)));
}

#[tokio::test]
async fn test_translate_withEmptyDocument_shouldFailWithEmptyDocument() {
    let mut session = loaded_session("");
    session.set_provider(Box::new(MockProvider::working()));

    let result = session.translate(None, "fr").await;

    assert!(matches!(result, Err(SessionError::EmptyDocument)));
}

#[tokio::test]
async fn test_translate_overQuota_shouldFailWithCounts() {
    // 15 characters against a limit of 10
    let mut session = TranslationSession::with_character_limit(10);
    session
        .load("1\n00:00:01,000 --> 00:00:02,000\nFifteen chars!!\n")
        .unwrap();
    let provider = MockProvider::working();
    let counter = provider.counter();
    session.set_provider(Box::new(provider));

    let result = session.translate(None, "fr").await;

    match result {
        Err(SessionError::QuotaExceeded { total_chars, limit }) => {
            assert_eq!(total_chars, 15);
            assert_eq!(limit, 10);
        }
        other => panic!("expected QuotaExceeded, got {:?}", other),
    }
    // The gate fails before any remote call is made
    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 0);
    // And the document is untouched
    assert_eq!(session.document().unwrap().entries[0].text, "Fifteen chars!!");
}

#[tokio::test]
async fn test_translate_overQuotaWithEmptyTarget_shouldReportQuotaFirst() {
    let mut session = TranslationSession::with_character_limit(1);
    session
        .load("1\n00:00:01,000 --> 00:00:02,000\nHello\n")
        .unwrap();
    session.set_provider(Box::new(MockProvider::working()));

    let result = session.translate(None, "").await;

    assert!(matches!(result, Err(SessionError::QuotaExceeded { .. })));
}

#[tokio::test]
async fn test_translate_withEmptyTargetLanguage_shouldFail() {
    let mut session = loaded_session(common::SAMPLE_SRT);
    session.set_provider(Box::new(MockProvider::working()));

    assert!(matches!(
        session.translate(None, "").await,
        Err(SessionError::MissingTargetLanguage)
    ));
    assert!(matches!(
        session.translate(None, "   ").await,
        Err(SessionError::MissingTargetLanguage)
    ));
}

#[tokio::test]
async fn test_translate_withWorkingProvider_shouldReplaceTextsPositionally() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n";
    let mut session = loaded_session(raw);
    session.set_provider(Box::new(MockProvider::working().with_transform(
        |text, _target| match text {
            "Hello" => "Bonjour".to_string(),
            "World" => "Monde".to_string(),
            other => other.to_string(),
        },
    )));

    session.translate(Some("en"), "fr").await.unwrap();

    let doc = session.document().unwrap();
    assert_eq!(doc.entries[0].text, "Bonjour");
    assert_eq!(doc.entries[1].text, "Monde");
    // Timing and numbering are untouched
    assert_eq!(doc.entries[0].start.to_string(), "00:00:01,000");
    assert_eq!(doc.entries[0].end.to_string(), "00:00:02,000");
    assert_eq!(doc.entries[1].start.to_string(), "00:00:03,000");
    assert_eq!(doc.entries[1].seq_num, 2);
    assert_eq!(session.state(), SessionState::Loaded);
}

#[tokio::test]
async fn test_translate_shouldRecomputeQuotaForNewTexts() {
    let mut session = loaded_session("1\n00:00:01,000 --> 00:00:02,000\nHi\n");
    session.set_provider(Box::new(
        MockProvider::working().with_transform(|_text, _target| "A much longer text".to_string()),
    ));
    assert_eq!(session.quota().unwrap().total_chars, 2);

    session.translate(None, "fr").await.unwrap();

    assert_eq!(session.quota().unwrap().total_chars, 18);
}

#[tokio::test]
async fn test_translate_withProviderFailure_shouldLeaveDocumentByteIdentical() {
    let mut session = loaded_session(common::SAMPLE_SRT);
    let before = session.serialize().unwrap();
    session.set_provider(Box::new(MockProvider::failing(MockErrorKind::Api)));

    let result = session.translate(None, "fr").await;

    assert!(matches!(
        result,
        Err(SessionError::Provider(ProviderError::Api { .. }))
    ));
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.serialize().unwrap(), before);
}

#[tokio::test]
async fn test_translate_withAuthFailure_shouldStayLoadedWithOriginalTexts() {
    let mut session = loaded_session(common::SAMPLE_SRT);
    let before = session.serialize().unwrap();
    session.set_provider(Box::new(MockProvider::failing(MockErrorKind::Authentication)));

    let result = session.translate(None, "fr").await;

    assert!(matches!(
        result,
        Err(SessionError::Provider(ProviderError::AuthenticationFailed(_)))
    ));
    assert_eq!(session.state(), SessionState::Loaded);
    assert_eq!(session.document().unwrap().entries[0].text, "This is a test subtitle.");
    assert_eq!(session.serialize().unwrap(), before);
}

#[tokio::test]
async fn test_translate_withMiscountedBatch_shouldRejectAndKeepDocument() {
    let mut session = loaded_session(common::SAMPLE_SRT);
    let before = session.serialize().unwrap();
    session.set_provider(Box::new(MockProvider::miscounting()));

    let result = session.translate(None, "fr").await;

    assert!(matches!(
        result,
        Err(SessionError::Provider(ProviderError::Parse(_)))
    ));
    assert_eq!(session.serialize().unwrap(), before);
}

#[tokio::test]
async fn test_translate_thenRetry_shouldSucceedAfterTransientFailure() {
    let mut session = loaded_session("1\n00:00:01,000 --> 00:00:02,000\nHello\n");

    session.set_provider(Box::new(MockProvider::failing(MockErrorKind::Connection)));
    assert!(session.translate(None, "fr").await.is_err());

    // Failures leave the document untouched, so a retry sees the same input
    session.set_provider(Box::new(MockProvider::working()));
    session.translate(None, "fr").await.unwrap();

    assert_eq!(session.document().unwrap().entries[0].text, "[fr] Hello");
}

#[test]
fn test_serialize_withoutTranslation_shouldRoundTripOriginalText() {
    let session = loaded_session(common::SAMPLE_SRT);

    let srt = session.serialize().unwrap();

    // Serializing an untranslated load is valid and stable
    assert_eq!(srt, common::SAMPLE_SRT.to_owned() + "\n");
}
