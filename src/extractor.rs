//! Questionnaire extraction over the Gemini client
//!
//! Formats the fixed six-question template around the supplied text, submits
//! it as one prompt, and parses the labeled response into per-field answers.
//! No retry here beyond what the HTTP layer does for rate limits; the
//! orchestrator decides what an extraction failure means for a seed.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::gemini;
use crate::questionnaire::{self, Questionnaire};

/// Abstraction over questionnaire extraction, so the orchestrator can be
/// driven by a fake in tests.
#[async_trait]
pub trait Extract: Send + Sync {
    /// Fill the questionnaire from the supplied text
    async fn extract(&self, text: &str) -> Result<Questionnaire>;
}

/// Extractor backed by a Gemini model
#[derive(Clone)]
pub struct QuestionnaireExtractor {
    client: gemini::Client,
    model: String,
}

impl QuestionnaireExtractor {
    /// Create an extractor for the given client and model
    pub fn new(client: gemini::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl Extract for QuestionnaireExtractor {
    #[instrument(skip(self, text), level = "debug")]
    async fn extract(&self, text: &str) -> Result<Questionnaire> {
        let prompt = questionnaire::prompt_for(text);
        debug!(
            text_chars = text.len(),
            model = %self.model,
            "extracting questionnaire"
        );
        let raw = self.client.generate(&self.model, &prompt).await?;
        Ok(Questionnaire::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn extracts_structured_answers_from_model_response() {
        let model_reply = "Mission: Make great chairs.\n\
                           Offerings: Chairs.\n\
                           Founding: 1950 by A. Carpenter.\n\
                           Headquarters: Copenhagen.\n\
                           Leadership: B. Joiner, CEO.\n\
                           Awards: Not Provided";
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": model_reply}]}}]
        });

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"contents": [{"role": "user"}]}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let mut client = gemini::Client::new("test-key");
        client.set_base_url(server.url());
        let extractor = QuestionnaireExtractor::new(client, "gemini-2.0-flash");

        let q = extractor.extract("landing page text").await.unwrap();
        assert!(q.mission.is_provided());
        assert!(!q.is_complete());
        assert_eq!(q.missing(), vec!["Awards"]);
        assert_eq!(q.raw, model_reply);

        mock.assert_async().await;
    }
}
