//! Request and response types for the Gemini generateContent API
//!
//! Only the text-generation subset this crate uses. The API accepts
//! snake_case field names, so the structs serialize as written.

use serde::{Deserialize, Serialize};

/// A piece of content exchanged with the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content (e.g., "user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts that make up this content
    pub parts: Vec<Part>,
}

impl Content {
    /// A user-role content holding a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::Text(text.into())],
        }
    }
}

/// A part of content. Text is the only media type this crate exchanges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Part {
    /// Text content
    #[serde(rename = "text")]
    Text(String),
}

/// Generation configuration for content generation
#[derive(Debug, Clone, Serialize, Default)]
pub struct GenerationConfig {
    /// Temperature controls randomness in generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

/// Request body for generateContent
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    /// The contents to generate from
    pub contents: Vec<Content>,

    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Response from content generation
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// The generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The text of the first candidate's first text part, if any
    pub fn text(&self) -> Option<&str> {
        let content = self.candidates.first()?.content.as_ref()?;
        content.parts.iter().map(|Part::Text(text)| text.as_str()).next()
    }
}

/// A candidate response from the model
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// The content of the candidate
    pub content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text("hello")],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                max_output_tokens: None,
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generation_config"]["temperature"], 0.2);
        assert!(json["generation_config"].get("max_output_tokens").is_none());
    }

    #[test]
    fn response_text_reads_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Generated text"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), Some("Generated text"));
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }
}
