use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{TranslationProvider, TranslationRequest};

/// DeepL caps the number of text parameters per translate request
pub const MAX_TEXTS_PER_REQUEST: usize = 50;

/// Request timeout; expiry surfaces as a connection error
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// DeepL API endpoint for free-tier keys (suffix `:fx`)
const FREE_ENDPOINT: &str = "https://api-free.deepl.com";

/// DeepL API endpoint for pro keys
const PRO_ENDPOINT: &str = "https://api.deepl.com";

/// DeepL client for interacting with the DeepL REST API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
}

/// Body of a translate request
#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    /// Texts to translate, order preserved by the API
    text: &'a [String],

    /// Target language, DeepL's uppercase code
    target_lang: String,

    /// Source language; omitted to let DeepL detect it
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
}

/// One translated text in a translate response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language DeepL detected the source to be
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

/// Body of a translate response
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    /// Translations, positionally matching the request texts
    translations: Vec<DeepLTranslation>,
}

/// Account usage as reported by the `/v2/usage` endpoint
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeepLUsage {
    /// Characters consumed in the current billing period
    pub character_count: u64,
    /// Character allowance of the account's plan
    pub character_limit: u64,
}

/// Error body DeepL returns alongside non-success statuses
#[derive(Debug, Deserialize)]
struct DeepLErrorBody {
    #[serde(default)]
    message: String,
}

impl DeepL {
    /// Create a new DeepL client.
    ///
    /// Free-tier keys carry a `:fx` suffix and live on a separate host, so
    /// the endpoint is picked from the key shape.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let endpoint = if api_key.ends_with(":fx") {
            FREE_ENDPOINT.to_string()
        } else {
            PRO_ENDPOINT.to_string()
        };
        Self::with_endpoint(api_key, endpoint)
    }

    /// Create a DeepL client against a specific base URL
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Query account usage from the `/v2/usage` endpoint
    pub async fn usage(&self) -> Result<DeepLUsage, ProviderError> {
        let url = format!("{}/v2/usage", self.endpoint.trim_end_matches('/'));

        let response = self.client.get(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to reach DeepL API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_status(status.as_u16(), response).await);
        }

        response.json::<DeepLUsage>().await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse usage response: {}", e)))
    }

    /// Submit one wire request of at most `MAX_TEXTS_PER_REQUEST` texts
    async fn translate_chunk(
        &self,
        texts: &[String],
        source_language: Option<&str>,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));
        let body = TranslateBody {
            text: texts,
            target_lang: target_language.to_ascii_uppercase(),
            source_lang: source_language.map(|code| code.to_ascii_uppercase()),
        };

        debug!("Submitting {} text(s) to DeepL", texts.len());

        let response = self.client.post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to reach DeepL API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let provider_error = Self::error_from_status(status.as_u16(), response).await;
            error!("DeepL API error: {}", provider_error);
            return Err(provider_error);
        }

        let translate_response = response.json::<TranslateResponse>().await
            .map_err(|e| ProviderError::Parse(format!("Failed to parse translate response: {}", e)))?;

        if translate_response.translations.len() != texts.len() {
            return Err(ProviderError::Parse(format!(
                "DeepL returned {} translation(s) for {} text(s)",
                translate_response.translations.len(),
                texts.len()
            )));
        }

        Ok(translate_response.translations.into_iter().map(|t| t.text).collect())
    }

    /// Map a non-success HTTP response to a provider error.
    ///
    /// DeepL reports quota exhaustion with its own 456 status; 401/403 cover
    /// missing and rejected keys.
    async fn error_from_status(status_code: u16, response: reqwest::Response) -> ProviderError {
        let message = match response.json::<DeepLErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => "no error detail provided".to_string(),
        };

        match status_code {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            456 => ProviderError::QuotaExceeded(message),
            _ => ProviderError::Api { status_code, message },
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepL {
    async fn translate_batch(&self, request: &TranslationRequest)
        -> Result<Vec<String>, ProviderError>
    {
        let mut translated = Vec::with_capacity(request.texts.len());

        // Chunks are submitted sequentially; a failure on any chunk fails the
        // whole batch and nothing collected so far reaches the caller.
        for chunk in request.texts.chunks(MAX_TEXTS_PER_REQUEST) {
            let chunk_result = self.translate_chunk(
                chunk,
                request.source_language.as_deref(),
                &request.target_language,
            ).await?;
            translated.extend(chunk_result);
        }

        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.usage().await.map(|_| ())
    }
}
