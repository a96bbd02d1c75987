/// Error types for categorization requests
use async_openai::error::OpenAIError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("API error: {0}")]
    Api(#[from] OpenAIError),

    #[error("Response does not match schema: {source}")]
    Schema {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Model refused to categorize: {0}")]
    Refusal(String),

    #[error("No API key found: set SILICONFLOW_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,
}

impl CategorizeError {
    /// Raw model output captured alongside the failure, if any was received
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Schema { raw, .. } => Some(raw),
            Self::Refusal(text) => Some(text),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CategorizeError>;
