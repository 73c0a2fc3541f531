//! OpenAI Chat Completions backend.

use std::time::Duration;

use deck_core::{Oracle, OracleRequest};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};
use crate::http::{build_client, ensure_success};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for the OpenAI Chat Completions API.
#[derive(Debug, Clone)]
pub struct OpenAiOracle {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiOracle {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, model, OPENAI_API_URL, None)
    }

    pub fn with_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, request: &'a OracleRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Send one request and return the first choice's message.
    pub fn send(&self, request: &OracleRequest) -> Result<String> {
        log::debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()?;

        let body: ChatResponse = ensure_success(response)?.json()?;
        reply_text(body)
    }
}

fn reply_text(body: ChatResponse) -> Result<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(OracleError::EmptyResponse("openai"))
}

impl Oracle for OpenAiOracle {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete(&self, request: &OracleRequest) -> deck_core::Result<String> {
        Ok(self.send(request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_puts_system_role_first() {
        let oracle = OpenAiOracle::new("key", DEFAULT_OPENAI_MODEL).unwrap();
        let request = OracleRequest {
            system: "role".to_string(),
            prompt: "prompt".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        };
        let body = serde_json::to_value(oracle.request_body(&request)).unwrap();

        assert_eq!(body["model"], DEFAULT_OPENAI_MODEL);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "role");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 4000);
    }

    #[test]
    fn test_reply_text_takes_first_choice() {
        let body: ChatResponse = serde_json::from_value(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "[]"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(reply_text(body).unwrap(), "[]");
    }

    #[test]
    fn test_missing_choice_is_empty_response() {
        let body: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(reply_text(body), Err(OracleError::EmptyResponse("openai"))));

        let body: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(reply_text(body).is_err());
    }
}
