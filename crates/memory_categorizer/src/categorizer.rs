//! Categorizer tying together the model client and the retry policy

use std::sync::OnceLock;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{CategorizeError, Result};
use crate::model::{CategoryModel, MemoryCategories, ModelClient};
use crate::retry::RetryPolicy;

/// Assigns normalized topical categories to memories
///
/// Each call makes up to `RetryPolicy::max_attempts` model requests and
/// returns the error of the last attempt if none succeeds.
pub struct Categorizer<M = ModelClient> {
    model: M,
    retry: RetryPolicy,
}

impl Categorizer<ModelClient> {
    /// Create a new Categorizer backed by an OpenAI-compatible client
    pub fn new(config: ClientConfig) -> Self {
        Self::with_model(ModelClient::new(config))
    }

    /// Create a Categorizer from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<M: CategoryModel> Categorizer<M> {
    /// Create a Categorizer over any model with the default retry policy
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the underlying model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get the retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Get lowercase, trimmed categories for a memory
    ///
    /// Order is preserved and blank labels are dropped. An empty list from
    /// the model is a valid, empty result.
    pub async fn get_categories_for_memory(&self, memory: &str) -> Result<Vec<String>> {
        let parsed = self
            .retry
            .run(|attempt| self.attempt(memory, attempt))
            .await?;

        Ok(normalize_categories(parsed.categories))
    }

    async fn attempt(&self, memory: &str, attempt: u32) -> Result<MemoryCategories> {
        debug!(attempt, memory_len = memory.len(), "Requesting categories");

        self.model.categorize(memory).await.map_err(|e| {
            log_failure(&e);
            e
        })
    }
}

fn log_failure(err: &CategorizeError) {
    error!(error = %err, "Failed to get categories");

    match err.raw_response() {
        Some(raw) => debug!(raw_response = raw, "Raw response"),
        None => debug!("Could not extract raw response: no response content received"),
    }
}

/// Trim and lowercase each category, dropping ones left empty
pub fn normalize_categories(categories: Vec<String>) -> Vec<String> {
    categories
        .into_iter()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Process-wide categorizer, built from environment on first use
static SHARED_CATEGORIZER: OnceLock<Categorizer> = OnceLock::new();

/// Get the shared categorizer, initializing it from environment if needed
///
/// A missing API key is reported on every call until one is configured.
pub fn shared_categorizer() -> Result<&'static Categorizer> {
    if let Some(categorizer) = SHARED_CATEGORIZER.get() {
        return Ok(categorizer);
    }

    let categorizer = Categorizer::from_env()?;
    Ok(SHARED_CATEGORIZER.get_or_init(|| categorizer))
}

/// Get categories for a memory using the shared categorizer
pub async fn get_categories_for_memory(memory: &str) -> Result<Vec<String>> {
    shared_categorizer()?
        .get_categories_for_memory(memory)
        .await
}
