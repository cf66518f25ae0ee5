use crate::config::ChatConfig;
use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "You are an interior design assistant.";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("OPENAI_API_KEY not set")]
    MissingApiKey,
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected response shape: no choices[0].message.content")]
    MalformedResponse,
}

#[async_trait]
pub trait ChatCompletion: Send + Sync + 'static {
    async fn complete(&self, message: &str) -> Result<String, ChatError>;
}

/// Reply shown to the user when the upstream call fails.
pub fn error_marker(err: &ChatError) -> String {
    format!("(AI Error: {err})")
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiChat {
    client: reqwest::Client,
    config: ChatConfig,
}

impl OpenAiChat {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChat {
    async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ChatError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": message },
                ],
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let body: Value = response.json().await?;
        extract_content(&body)
    }
}

fn extract_content(body: &Value) -> Result<String, ChatError> {
    body["choices"]
        .get(0)
        .and_then(|choice| choice["message"]["content"].as_str())
        .map(str::to_string)
        .ok_or(ChatError::MalformedResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let body = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Try warm oak." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(extract_content(&body).unwrap(), "Try warm oak.");
    }

    #[test]
    fn empty_choices_are_malformed() {
        let body = json!({ "choices": [] });
        assert!(matches!(
            extract_content(&body),
            Err(ChatError::MalformedResponse)
        ));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let chat = OpenAiChat::new(ChatConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            ..ChatConfig::default()
        });
        assert_eq!(chat.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let chat = OpenAiChat::new(ChatConfig::default());
        let err = chat.complete("hello").await.unwrap_err();
        assert_eq!(error_marker(&err), "(AI Error: OPENAI_API_KEY not set)");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_error() {
        let chat = OpenAiChat::new(ChatConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:1".to_string(),
            ..ChatConfig::default()
        });
        let err = chat.complete("hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Transport(_)));
        assert!(error_marker(&err).starts_with("(AI Error: "));
    }
}
