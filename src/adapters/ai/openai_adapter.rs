//! OpenAI-compatible adapter for lesson generation.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Declares the lesson schema through `response_format = json_schema`.

use super::body_snippet;
use crate::domain::prompt::build_prompt;
use crate::domain::schema::{SchemaDialect, lesson_schema, parse_lesson};
use crate::domain::{DomainError, GeneratedLesson, LessonConfig};
use crate::ports::LessonGenerator;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// OpenAI-compatible AI adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API with structured outputs
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `client` - HTTP client (timeout already applied if configured)
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    pub fn new(client: reqwest::Client, api_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            model,
        }
    }

    fn request_body(&self, config: &LessonConfig) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(config),
            }],
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaSpec {
                    name: "generated_lesson".to_string(),
                    schema: lesson_schema(SchemaDialect::JsonSchema),
                    // teacherNotes is optional, which strict mode does not allow
                    strict: false,
                },
            },
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaSpec,
}

#[derive(Serialize)]
struct JsonSchemaSpec {
    name: String,
    schema: serde_json::Value,
    strict: bool,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl LessonGenerator for OpenAiAdapter {
    async fn generate(&self, config: &LessonConfig) -> Result<GeneratedLesson, DomainError> {
        info!(
            model = %self.model,
            grade = %config.grade,
            unit = %config.unit,
            lesson = %config.lesson_type,
            "requesting lesson from OpenAI-compatible API"
        );

        let mut request = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&self.request_body(config));
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Generation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = body_snippet(&response.text().await.unwrap_or_default());
            warn!(status = %status, body = %body, "AI API returned error");
            return Err(DomainError::Generation(format!("API error {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Generation(format!("Failed to parse API response: {}", e)))?;

        let raw_content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Generation("No response choices returned".to_string()))?;

        debug!(raw_len = raw_content.len(), "received AI response");

        let lesson = parse_lesson(&raw_content)?;
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
    fn test_request_declares_schema() {
        let adapter = OpenAiAdapter::new(
            reqwest::Client::new(),
            "http://localhost:11434/v1/chat/completions".into(),
            String::new(),
            "llama3.2".into(),
        );
        let body = serde_json::to_value(adapter.request_body(&LessonConfig::default())).unwrap();
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(
            body["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(
            body["messages"][0]["content"]
                .as_str()
                .unwrap()
                .contains("Getting Started")
        );
    }

    #[test]
    fn test_null_content_is_tolerated_by_wire_type() {
        let raw = r#"{"choices":[{"message":{"content":null}}]}"#;
        let resp: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.choices[0].message.content.is_none());
    }
}
