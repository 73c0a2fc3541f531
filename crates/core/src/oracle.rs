//! The text-generation oracle seam.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One prompt sent to a text-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// System role string.
    pub system: String,
    /// The single user message.
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A backend that turns a prompt into a single text reply.
///
/// Implementations perform one blocking call and report failures as
/// [`crate::Error::OracleCallFailed`]. They must not retry.
pub trait Oracle {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Send the request and return the reply text.
    fn complete(&self, request: &OracleRequest) -> Result<String>;
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(&self, request: &OracleRequest) -> Result<String> {
        (**self).complete(request)
    }
}

impl<T: Oracle + ?Sized> Oracle for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete(&self, request: &OracleRequest) -> Result<String> {
        (**self).complete(request)
    }
}
