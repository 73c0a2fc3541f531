//! Backend selection and credentials.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use deck_core::Oracle;

use crate::anthropic::{AnthropicOracle, ANTHROPIC_API_URL, DEFAULT_ANTHROPIC_MODEL};
use crate::error::{OracleError, Result};
use crate::http::DEFAULT_TIMEOUT;
use crate::openai::{OpenAiOracle, DEFAULT_OPENAI_MODEL, OPENAI_API_URL};

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "DECK_MODEL";

/// Supported text-generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Anthropic,
    OpenAi,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variables holding the API key, in lookup order.
    pub fn key_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Anthropic => &["CLAUDE_API_KEY", "ANTHROPIC_API_KEY"],
            Provider::OpenAi => &["OPENAI_API_KEY"],
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            Provider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::Anthropic => ANTHROPIC_API_URL,
            Provider::OpenAi => OPENAI_API_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "openai" | "gpt" => Ok(Provider::OpenAi),
            other => Err(OracleError::UnknownProvider(other.to_string())),
        }
    }
}

/// Settings for building an oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// Request timeout, [`DEFAULT_TIMEOUT`] unless overridden.
    pub timeout: Duration,
}

impl OracleConfig {
    /// Defaults for a provider, without an API key.
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            api_key: None,
            model: provider.default_model().to_string(),
            endpoint: provider.default_endpoint().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key and model override from the process environment.
    pub fn from_env(provider: Provider) -> Self {
        Self::from_lookup(provider, |name| std::env::var(name).ok())
    }

    /// Like [`OracleConfig::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(provider: Provider, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(provider);
        config.api_key = provider
            .key_vars()
            .iter()
            .filter_map(|var| lookup(var))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the configured backend.
    pub fn build(&self) -> Result<Box<dyn Oracle>> {
        let api_key = self
            .api_key
            .clone()
            .ok_or(OracleError::MissingApiKey(self.provider.key_vars()[0]))?;

        log::debug!("Using {} oracle with model {}", self.provider, self.model);
        Ok(match self.provider {
            Provider::Anthropic => Box::new(AnthropicOracle::with_endpoint(
                api_key,
                &self.model,
                &self.endpoint,
                Some(self.timeout),
            )?),
            Provider::OpenAi => Box::new(OpenAiOracle::with_endpoint(
                api_key,
                &self.model,
                &self.endpoint,
                Some(self.timeout),
            )?),
        })
    }
}
