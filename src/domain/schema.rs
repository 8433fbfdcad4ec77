//! Output contract for lesson generation: the declared response schema and
//! the parser that turns response text into a [`GeneratedLesson`].

use super::entities::GeneratedLesson;
use super::errors::DomainError;
use serde_json::{Value, json};
use tracing::warn;

/// Schema notation expected by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDialect {
    /// Standard JSON Schema (lower-case type names). OpenAI `json_schema`.
    JsonSchema,
    /// OpenAPI subset with upper-case type names. Gemini `responseSchema`.
    OpenApi,
}

/// Declared shape of the generation response.
pub fn lesson_schema(dialect: SchemaDialect) -> Value {
    let schema = json!({
        "type": "object",
        "properties": {
            "outline": {
                "type": "string",
                "description": "Tóm tắt sư phạm của bài giảng"
            },
            "fileName": {
                "type": "string",
                "description": "Tên file theo chuẩn: English_Lop_Unit_Lesson_GlobalSuccess.pptx"
            },
            "slides": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "Tiêu đề Slide" },
                        "points": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Nội dung chính của slide (tối đa 6 dòng)"
                        },
                        "teacherNotes": {
                            "type": "string",
                            "description": "Hướng dẫn dành cho giáo viên khi dạy slide này"
                        },
                        "activityType": {
                            "type": "string",
                            "description": "Loại hoạt động: Vocabulary, Grammar, Practice, Game..."
                        }
                    },
                    "required": ["title", "points", "activityType"]
                }
            }
        },
        "required": ["outline", "slides", "fileName"]
    });

    match dialect {
        SchemaDialect::JsonSchema => schema,
        SchemaDialect::OpenApi => uppercase_types(schema),
    }
}

/// Rewrite every `"type": "x"` to `"type": "X"`, recursively.
fn uppercase_types(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| {
                    let v = match (key.as_str(), v) {
                        ("type", Value::String(s)) => Value::String(s.to_uppercase()),
                        // property names are user keys, not schema keywords
                        ("properties", Value::Object(props)) => Value::Object(
                            props
                                .into_iter()
                                .map(|(name, p)| (name, uppercase_types(p)))
                                .collect(),
                        ),
                        (_, v) => uppercase_types(v),
                    };
                    (key, v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(uppercase_types).collect()),
        other => other,
    }
}

/// Parse response text as a lesson. No repair: malformed or incomplete
/// JSON is a generation failure and nothing partial is returned.
pub fn parse_lesson(text: &str) -> Result<GeneratedLesson, DomainError> {
    serde_json::from_str(text).map_err(|e| {
        warn!(
            error = %e,
            json = %text.chars().take(200).collect::<String>(),
            "lesson JSON parse failed"
        );
        DomainError::Generation(format!("Failed to parse lesson JSON: {}", e))
    })
}
