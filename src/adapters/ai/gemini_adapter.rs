//! Google Gemini adapter for lesson generation.
//!
//! Uses `generateContent` with `responseMimeType = application/json` and a
//! `responseSchema`, so the first candidate's text is the lesson JSON itself.

use super::body_snippet;
use crate::domain::prompt::build_prompt;
use crate::domain::schema::{SchemaDialect, lesson_schema, parse_lesson};
use crate::domain::{DomainError, GeneratedLesson, LessonConfig};
use crate::ports::LessonGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `client` - HTTP client (timeout already applied if configured)
    /// * `base_url` - API root, e.g. "https://generativelanguage.googleapis.com/v1beta"
    /// * `api_key` - Gemini API key
    /// * `model` - Model name, e.g. "gemini-3-flash-preview"
    pub fn new(client: reqwest::Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(config: &LessonConfig) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: build_prompt(config),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: lesson_schema(SchemaDialect::OpenApi),
            },
        }
    }

    /// Concatenated text parts of the first candidate.
    fn response_text(response: GenerateResponse) -> Result<String, DomainError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Generation("No candidates returned".to_string()))?;
        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(DomainError::Generation(format!(
                "Empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait::async_trait]
impl LessonGenerator for GeminiAdapter {
    async fn generate(&self, config: &LessonConfig) -> Result<GeneratedLesson, DomainError> {
        info!(
            model = %self.model,
            grade = %config.grade,
            unit = %config.unit,
            lesson = %config.lesson_type,
            "requesting lesson from Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&Self::request_body(config))
            .send()
            .await
            .map_err(|e| DomainError::Generation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_snippet(&response.text().await.unwrap_or_default());
            warn!(status = %status, body = %body, "Gemini API returned error");
            return Err(DomainError::Generation(format!("API error {}: {}", status, body)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Generation(format!("Failed to parse API response: {}", e)))?;

        let text = Self::response_text(body)?;
        debug!(raw_len = text.len(), "received Gemini response");

        let lesson = parse_lesson(&text)?;
        info!(
            slides = lesson.slides.len(),
            file_name = %lesson.file_name,
            "lesson generated"
        );
        Ok(lesson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiAdapter::request_body(&LessonConfig::default()))
            .unwrap();
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("Lớp: 6"));
    }

    #[test]
    fn test_endpoint() {
        let adapter = GeminiAdapter::new(
            reqwest::Client::new(),
            "https://example.test/v1beta/".into(),
            "k".into(),
            "gemini-3-flash-preview".into(),
        );
        assert_eq!(
            adapter.endpoint(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(GeminiAdapter::response_text(resp).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_response_text_blocked() {
        let raw = r#"{"candidates":[{"finishReason":"SAFETY"}]}"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        let err = GeminiAdapter::response_text(resp).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(GeminiAdapter::response_text(empty).is_err());
    }
}
