use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::GroundingChunk;
use crate::error::{LensError, LensResult};

use super::{GenerativeModel, LensConfig, ModelRequest, ModelResponse};

/// Blocking client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &LensConfig, api_key: impl Into<String>) -> LensResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LensError::Config(format!("reqwest client error: {e}")))?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// Builds a client with the key read from `config.api_key_env`.
    pub fn from_env(config: &LensConfig) -> LensResult<Self> {
        let api_key = config.api_key_from_env()?;
        Self::new(config, api_key)
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GenerativeModel for GeminiClient {
    fn generate(&self, request: &ModelRequest) -> LensResult<ModelResponse> {
        let body = GenerateContentRequest::from_model_request(request);
        debug!(
            kind = %request.kind,
            prompt_len = request.prompt.len(),
            grounded = request.search_grounding,
            "sending generateContent request"
        );

        let reply: GenerateContentResponse = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(kind = %request.kind, error = %e, "generateContent request failed");
                LensError::transport(request.kind, format!("gemini request error: {e}"))
            })?
            .json()
            .map_err(|e| {
                warn!(kind = %request.kind, error = %e, "generateContent reply undecodable");
                LensError::transport(request.kind, format!("gemini decode error: {e}"))
            })?;

        let response = reply.into_model_response();
        if response.text.is_empty() {
            return Err(LensError::transport(
                request.kind,
                "gemini reply contained no text",
            ));
        }
        debug!(
            kind = %request.kind,
            text_len = response.text.len(),
            grounding = response.grounding.len(),
            "received generateContent reply"
        );
        Ok(response)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_model_request(request: &'a ModelRequest) -> Self {
        let tools = if request.search_grounding {
            vec![Tool {
                google_search: EmptyObject {},
            }]
        } else {
            Vec::new()
        };
        Self {
            contents: [Content {
                role: "user",
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<RawGroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGroundingChunk {
    #[serde(default)]
    web: Option<GroundingChunk>,
}

impl GenerateContentResponse {
    // Text comes from the first candidate only, like the SDK's `.text`.
    fn into_model_response(self) -> ModelResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return ModelResponse::default();
        };
        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();
        let grounding = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .collect()
            })
            .unwrap_or_default();
        ModelResponse { text, grounding }
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerateContentRequest, GenerateContentResponse};
    use crate::api::ModelRequest;
    use crate::core::GroundingChunk;
    use crate::error::RequestKind;

    #[test]
    fn request_body_carries_search_tool_when_grounded() {
        let request = ModelRequest::new(RequestKind::Summary, "hello");
        let body = serde_json::to_value(GenerateContentRequest::from_model_request(&request))
            .expect("serialize");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body["tools"][0]["google_search"].is_object());

        let ungrounded = request.with_search_grounding(false);
        let body = serde_json::to_value(GenerateContentRequest::from_model_request(&ungrounded))
            .expect("serialize");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn reply_text_parts_and_grounding_are_lifted() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Hello, "}, {"text": "world"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"retrievedContext": {}}
                ]}
            }]
        }"#;
        let reply: GenerateContentResponse = serde_json::from_str(raw).expect("decode");
        let response = reply.into_model_response();
        assert_eq!(response.text, "Hello, world");
        assert_eq!(
            response.grounding,
            vec![GroundingChunk::web("https://a.example", "A")]
        );
    }

    #[test]
    fn reply_without_candidates_is_empty() {
        let reply: GenerateContentResponse = serde_json::from_str("{}").expect("decode");
        assert!(reply.into_model_response().text.is_empty());
    }
}
