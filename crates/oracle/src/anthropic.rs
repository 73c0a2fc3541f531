//! Anthropic Messages API backend.

use std::time::Duration;

use deck_core::{Oracle, OracleRequest};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, Result};
use crate::http::{build_client, ensure_success};

/// Messages endpoint.
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Value of the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Blocking client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicOracle {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicOracle {
    /// Create a client for `model` at the public endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_endpoint(api_key, model, ANTHROPIC_API_URL, None)
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

    fn request_body<'a>(&'a self, request: &'a OracleRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        }
    }

    /// Send one request and return the concatenated text blocks.
    pub fn send(&self, request: &OracleRequest) -> Result<String> {
        log::debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(request))
            .send()?;

        let body: MessagesResponse = ensure_success(response)?.json()?;
        reply_text(body)
    }
}

fn reply_text(body: MessagesResponse) -> Result<String> {
    let text: String = body
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect();
    if text.trim().is_empty() {
        return Err(OracleError::EmptyResponse("anthropic"));
    }
    Ok(text)
}

impl Oracle for AnthropicOracle {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn complete(&self, request: &OracleRequest) -> deck_core::Result<String> {
        Ok(self.send(request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> OracleRequest {
        OracleRequest {
            system: "role".to_string(),
            prompt: "주제: AI".to_string(),
            temperature: 0.7,
            max_tokens: 4000,
        }
    }

    #[test]
    fn test_request_body_shape() {
        let oracle = AnthropicOracle::new("key", DEFAULT_ANTHROPIC_MODEL).unwrap();
        let request = sample_request();
        let body = serde_json::to_value(oracle.request_body(&request)).unwrap();

        assert_eq!(body["model"], DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["system"], "role");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "주제: AI");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_reply_text_joins_text_blocks() {
        let body: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "content": [
                {"type": "text", "text": "[{\"title\": \"A\","},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": " \"content\": \"a\"}]"}
            ],
            "usage": {"input_tokens": 1, "output_tokens": 2}
        }))
        .unwrap();
        assert_eq!(
            reply_text(body).unwrap(),
            "[{\"title\": \"A\", \"content\": \"a\"}]"
        );
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let body: MessagesResponse = serde_json::from_value(json!({"content": []})).unwrap();
        assert!(matches!(reply_text(body), Err(OracleError::EmptyResponse(_))));
    }

    #[test]
    fn test_unreachable_endpoint_fails_as_oracle_call() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let oracle = AnthropicOracle::with_endpoint(
            "key",
            DEFAULT_ANTHROPIC_MODEL,
            format!("http://127.0.0.1:{}/v1/messages", port),
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let result = oracle.complete(&sample_request());
        assert!(matches!(result, Err(deck_core::Error::OracleCallFailed(_))));
    }
}
