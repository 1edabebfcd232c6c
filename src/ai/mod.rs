//! AI text enhancement: modes, the enhancer trait and the Gemini client.

mod gemini;
mod mode;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use mode::EnhanceMode;

/// Errors from an enhancement request.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured.
    #[error("API key missing")]
    MissingCredential,

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// A service that rewrites note text.
///
/// One request per call; no retries and no cancellation.
#[async_trait]
pub trait TextEnhancer {
    async fn enhance(&self, text: &str, mode: EnhanceMode) -> Result<String, AiError>;
}
