//! Translation providers.
//!
//! A provider turns one batch of source-locale templates into target-locale
//! templates. It is a thin request/response collaborator: retries, delays
//! and merging belong to the sync engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Credentials;
use crate::core::parsers::json::Catalog;

/// One batch of keys to translate.
#[derive(Debug, Clone, Copy)]
pub struct TranslationRequest<'a> {
    pub keys: &'a Catalog,
    pub source_language: &'a str,
    pub target_language: &'a str,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} answered with status {code}: {body}")]
    Status {
        endpoint: String,
        code: u16,
        body: String,
    },
    #[error("could not decode the response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait TranslationProvider {
    /// Translate every key of the request. Keys missing from the returned
    /// map are treated as failed.
    fn translate(&self, request: &TranslationRequest<'_>) -> Result<Catalog, ProviderError>;
}

// ============================================================
// HTTP backend
// ============================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody<'a> {
    api_key: &'a str,
    project_id: &'a str,
    from_lang: &'a str,
    to_lang: &'a str,
    keys: &'a Catalog,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translated: Catalog,
}

/// Project-scoped translation backend: one POST per batch carrying the
/// keyed map, answered with `{ "translated": { key: text } }`.
pub struct HttpProvider {
    agent: ureq::Agent,
    credentials: Credentials,
}

impl HttpProvider {
    pub fn new(credentials: Credentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .timeout_write(Duration::from_secs(30))
            .timeout(Duration::from_secs(60))
            .build();
        Self { agent, credentials }
    }

    pub fn endpoint(&self) -> &str {
        &self.credentials.endpoint
    }
}

impl TranslationProvider for HttpProvider {
    fn translate(&self, request: &TranslationRequest<'_>) -> Result<Catalog, ProviderError> {
        let endpoint = self.endpoint().to_string();
        let body = TranslateBody {
            api_key: &self.credentials.api_key,
            project_id: &self.credentials.project_id,
            from_lang: request.source_language,
            to_lang: request.target_language,
            keys: request.keys,
            format: "text",
        };

        tracing::debug!(
            "POST {} ({} keys, {} -> {})",
            endpoint,
            request.keys.len(),
            request.source_language,
            request.target_language
        );

        let response = match self.agent.post(&endpoint).send_json(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(ProviderError::Status {
                    endpoint,
                    code,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(ProviderError::Transport {
                    endpoint,
                    message: transport.to_string(),
                });
            }
        };

        let decoded: TranslateResponse = response
            .into_json()
            .map_err(|source| ProviderError::Decode { endpoint, source })?;
        Ok(decoded.translated)
    }
}

// ============================================================
// Offline pseudo-translation
// ============================================================

/// Development provider: prefixes every template with the upper-cased
/// target language (`[FR] Welcome`) without touching the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct PseudoProvider;

impl TranslationProvider for PseudoProvider {
    fn translate(&self, request: &TranslationRequest<'_>) -> Result<Catalog, ProviderError> {
        let tag = request.target_language.to_uppercase();
        Ok(request
            .keys
            .iter()
            .map(|(key, text)| (key.clone(), format!("[{}] {}", tag, text)))
            .collect())
    }
}
