//! Blocking HTTP text-generation backends for slide content requests.
//!
//! Each backend implements [`deck_core::Oracle`]: one request, one reply,
//! no retry. Failures surface as [`deck_core::Error::OracleCallFailed`].

pub mod anthropic;
pub mod config;
pub mod error;
mod http;
pub mod openai;

pub use anthropic::AnthropicOracle;
pub use config::{OracleConfig, Provider};
pub use error::{OracleError, Result};
pub use http::DEFAULT_TIMEOUT;
pub use openai::OpenAiOracle;
