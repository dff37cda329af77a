//! # Advisory Text
//!
//! Asks an external text-generation API (Gemini) for handling guidance on
//! a product: disposal steps when expired, storage and sell-first tips when
//! close to expiry, recent recalls.
//!
//! Best effort. Any failure is logged and replaced by [`FALLBACK_ADVICE`];
//! the command itself never fails because of it.

use std::time::Duration;

use pex_core::ExpiryStatus;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::state::AppConfig;

/// Shown whenever the API cannot answer.
pub const FALLBACK_ADVICE: &str = "Guidance is unavailable right now. Please check the ANVISA \
     disposal manual or contact your regional pharmacy council (CRF).";

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// At most this many cited sources are appended.
const MAX_SOURCES: usize = 3;

#[derive(Debug, Error)]
enum AdviceError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API answered {0}")]
    Status(reqwest::StatusCode),
    #[error("response had no text")]
    Empty,
}

/// Client for advisory text.
#[derive(Debug, Clone)]
pub struct AdviceClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl AdviceClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        AdviceClient {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Points the client at another base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Guidance for `product_name` in tier `status`. Never fails.
    pub async fn advice(&self, product_name: &str, status: ExpiryStatus) -> String {
        match self.request(product_name, status).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, product = %product_name, "Advisory text unavailable, using fallback");
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    async fn request(&self, product_name: &str, status: ExpiryStatus) -> Result<String, AdviceError> {
        let api_key = self.api_key.as_deref().ok_or(AdviceError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(product_name, status) }] }],
            "tools": [{ "google_search": {} }],
        });

        debug!(model = %self.model, "Requesting advisory text");
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AdviceError::Status(response.status()));
        }

        let data: GenerateResponse = response.json().await?;
        compose_answer(&data).ok_or(AdviceError::Empty)
    }
}

/// Instruction sent to the model.
pub fn build_prompt(product_name: &str, status: ExpiryStatus) -> String {
    format!(
        "You are an expert pharmaceutical consultant in Brazil. The product \"{product_name}\" \
         has status \"{status}\". Using search for up-to-date information (ANVISA rules and \
         local disposal options):\n\
         1. If expired: give the exact steps for ethical disposal.\n\
         2. If close to expiry: key storage tips or how to prioritise selling it.\n\
         3. Safety alerts: mention any recent recall or sanitary notice for this medicine.\n\
         Keep a professional, direct tone, in bullet points, answering in Brazilian Portuguese. \
         Cite sources for any recall alert."
    )
}

// =============================================================================
// Response payload
// =============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct WebSource {
    uri: Option<String>,
}

/// Joins the text parts of the first candidate and appends up to three
/// cited source links.
fn compose_answer(response: &GenerateResponse) -> Option<String> {
    let candidate = response.candidates.first()?;

    let text: String = candidate
        .content
        .as_ref()?
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        return None;
    }

    let sources: Vec<&str> = candidate
        .grounding_metadata
        .iter()
        .flat_map(|m| &m.grounding_chunks)
        .filter_map(|c| c.web.as_ref()?.uri.as_deref())
        .take(MAX_SOURCES)
        .collect();

    if sources.is_empty() {
        Some(text)
    } else {
        Some(format!("{text}\n\nSources consulted:\n{}", sources.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_falls_back() {
        let client = AdviceClient::new(&AppConfig::default());
        let text = client.advice("DIPIRONA", ExpiryStatus::Expired).await;
        assert_eq!(text, FALLBACK_ADVICE);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back() {
        let config = AppConfig {
            gemini_api_key: Some("test-key".to_string()),
            ..AppConfig::default()
        };
        let client = AdviceClient::new(&config).with_endpoint("http://127.0.0.1:1");
        let text = client.advice("DIPIRONA", ExpiryStatus::Critical).await;
        assert_eq!(text, FALLBACK_ADVICE);
    }

    #[test]
    fn test_prompt_mentions_product_and_status() {
        let prompt = build_prompt("AMOXICILINA 500MG", ExpiryStatus::Critical);
        assert!(prompt.contains("\"AMOXICILINA 500MG\""));
        assert!(prompt.contains("\"CRITICAL\""));
    }

    #[test]
    fn test_compose_answer_appends_three_sources() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Descarte " }, { "text": "em farmácia." }] },
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://a" } },
                    { "web": {} },
                    { "web": { "uri": "https://b" } },
                    { "web": { "uri": "https://c" } },
                    { "web": { "uri": "https://d" } }
                ]}
            }]
        }))
        .unwrap();

        assert_eq!(
            compose_answer(&response).unwrap(),
            "Descarte em farmácia.\n\nSources consulted:\nhttps://a\nhttps://b\nhttps://c"
        );
    }

    #[test]
    fn test_compose_answer_without_text() {
        assert!(compose_answer(&GenerateResponse::default()).is_none());
        let response: GenerateResponse =
            serde_json::from_value(json!({ "candidates": [{ "content": { "parts": [] } }] }))
                .unwrap();
        assert!(compose_answer(&response).is_none());
    }
}
