//! Minimal Gemini Developer API client
//!
//! One operation is needed here: submit a single formatted prompt, get a
//! single free-form text completion back. No streaming, no structured output
//! schema on the wire.

mod http;
mod types;

pub use http::HttpClient;
pub use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

use tracing::{debug, instrument};

use crate::error::{Error, Result};

/// Extraction wants the text's facts, not the model's creativity
const EXTRACTION_TEMPERATURE: f64 = 0.2;

/// Client for the Gemini API
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Create a new client with an API key for the Gemini Developer API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(api_key),
        }
    }

    /// Point the client at a local mock server (for testing only)
    #[cfg(test)]
    pub fn set_base_url(&mut self, url: String) {
        self.http_client.set_base_url(url);
    }

    /// Generate a completion for a single prompt
    #[instrument(skip(self, prompt), level = "debug")]
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                temperature: Some(EXTRACTION_TEMPERATURE),
                max_output_tokens: None,
            }),
        };

        let path = format!("models/{model}:generateContent");
        debug!("Generating content from model {}", model);

        let response: GenerateContentResponse = self.http_client.post(&path, &request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or_else(|| Error::UnexpectedResponse("response carried no text part".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn generate_returns_first_candidate_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "candidates": [{
                    "content": {
                        "parts": [{
                            "text": "Generated text"
                        }]
                    }
                }]
            }"#,
            )
            .create_async()
            .await;

        let mut client = Client::new("test-key");
        client.set_base_url(server.url());

        let text = client
            .generate("gemini-2.0-flash", "Hello, world!")
            .await
            .unwrap();
        assert_eq!(text, "Generated text");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let mut client = Client::new("test-key");
        client.set_base_url(server.url());

        let result = client.generate("gemini-2.0-flash", "prompt").await;
        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }
}
