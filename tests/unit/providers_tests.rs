/*!
 * Tests for the provider implementations
 */

use subtran::errors::ProviderError;
use subtran::providers::deepl::{DeepL, MAX_TEXTS_PER_REQUEST};
use subtran::providers::mock::{MockErrorKind, MockProvider};
use subtran::providers::{TranslationProvider, TranslationRequest};

fn request(texts: Vec<String>) -> TranslationRequest {
    TranslationRequest::new(texts, None, "de".to_string())
}

#[tokio::test]
async fn test_translateBatch_withManyTexts_shouldPreserveCountAndOrder() {
    let provider = MockProvider::working();
    // More texts than one DeepL wire request carries
    let texts: Vec<String> = (0..MAX_TEXTS_PER_REQUEST + 10)
        .map(|i| format!("Line {}", i))
        .collect();

    let result = provider.translate_batch(&request(texts.clone())).await.unwrap();

    assert_eq!(result.len(), texts.len());
    for (i, translated) in result.iter().enumerate() {
        assert_eq!(translated, &format!("[de] Line {}", i));
    }
}

#[tokio::test]
async fn test_translateBatch_withEmptyBatch_shouldReturnEmpty() {
    let provider = MockProvider::working();

    let result = provider.translate_batch(&request(Vec::new())).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_testConnection_withFailingProvider_shouldPropagateErrorKind() {
    let provider = MockProvider::failing(MockErrorKind::Quota);

    let result = provider.test_connection().await;

    assert!(matches!(result, Err(ProviderError::QuotaExceeded(_))));
}

#[test]
fn test_translationRequest_shouldKeepLanguagesAndOrder() {
    let request = TranslationRequest::new(
        vec!["one".to_string(), "two".to_string()],
        Some("en".to_string()),
        "ja".to_string(),
    );

    assert_eq!(request.texts, vec!["one", "two"]);
    assert_eq!(request.source_language.as_deref(), Some("en"));
    assert_eq!(request.target_language, "ja");
}

/// Test the DeepL provider against the live API
#[tokio::test]
#[ignore]
async fn test_deepl_provider_withValidApiKey_shouldTranslate() {
    // This test should only run if an API key is provided
    let api_key = std::env::var("DEEPL_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        return;
    }

    let client = DeepL::new(api_key);
    let request = TranslationRequest::new(
        vec!["Hello".to_string(), "World".to_string()],
        Some("en".to_string()),
        "fr".to_string(),
    );

    let result = client.translate_batch(&request).await.unwrap();

    assert_eq!(result.len(), 2);
    assert!(!result[0].is_empty());
    println!("DeepL response: {:?}", result);
}

/// Test the DeepL usage endpoint against the live API
#[tokio::test]
#[ignore]
async fn test_deepl_usage_withValidApiKey_shouldReportQuota() {
    let api_key = std::env::var("DEEPL_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        return;
    }

    let client = DeepL::new(api_key);
    let usage = client.usage().await.unwrap();

    assert!(usage.character_limit > 0);
    println!("DeepL usage: {}/{}", usage.character_count, usage.character_limit);
}

#[tokio::test]
async fn test_deepl_withUnreachableEndpoint_shouldFailWithConnectionError() {
    // Port 9 (discard) on localhost is not running a DeepL API
    let client = DeepL::with_endpoint("test-key:fx", "http://127.0.0.1:9");
    let request = TranslationRequest::new(vec!["Hello".to_string()], None, "fr".to_string());

    let result = client.translate_batch(&request).await;

    assert!(matches!(result, Err(ProviderError::Connection(_))));
}
