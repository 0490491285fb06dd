//! Generative service client and the email analyzer built on top of it

use std::future::Future;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AnalysisError;
use super::prompts::{self, RESPONSE_MIME_TYPE, SYSTEM_INSTRUCTION};
use super::types::AnalysisResult;

/// One structured-output generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub schema: Value,
    pub temperature: f32,
}

/// The external generative service, as seen by the analyzer.
///
/// Returns the raw text payload, `None` when the service produced no text.
pub trait GenerativeService: Send + Sync {
    fn generate(
        &self,
        request: &GenerateRequest,
    ) -> impl Future<Output = Result<Option<String>, AnalysisError>> + Send;
}

/// Gemini `generateContent` API client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, request: &GenerateRequest) -> Result<Option<String>, AnalysisError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: RESPONSE_MIME_TYPE,
                response_schema: &request.schema,
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Transport(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let text = response.text().await?;
        // A 200 that is not a Gemini envelope (e.g. a proxy page) never reached the model
        let envelope: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            AnalysisError::Transport(format!("Invalid Gemini response envelope: {}", e))
        })?;
        Ok(envelope.into_text())
    }
}

impl GenerativeService for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, AnalysisError> {
        self.send(request).await
    }
}

/// Turns raw email text into a typed risk assessment through a generative service
pub struct Analyzer<S> {
    service: S,
    temperature: f32,
    schema: Value,
}

impl<S: GenerativeService> Analyzer<S> {
    pub fn new(service: S, temperature: f32) -> Self {
        Self {
            service,
            temperature,
            schema: prompts::response_schema(),
        }
    }

    pub fn request_for(&self, email_text: &str) -> GenerateRequest {
        GenerateRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompts::analysis_prompt(email_text),
            schema: self.schema.clone(),
            temperature: self.temperature,
        }
    }

    /// Run one analysis. A single attempt; any failure is returned as-is.
    pub async fn analyze(&self, email_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let request = self.request_for(email_text);
        let payload = self
            .service
            .generate(&request)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        AnalysisResult::from_json(&payload)
    }
}
