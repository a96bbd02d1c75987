//! Model client module for categorization inference
//!
//! This module provides:
//! - `client`: OpenAI-compatible model client with structured output
//! - `mock`: Scripted model for tests and offline use
//! - `types`: Response schema

mod client;
mod mock;
mod types;

pub use client::ModelClient;
pub use mock::MockModel;
pub use types::{MemoryCategories, SCHEMA_NAME};

use async_trait::async_trait;

use crate::error::Result;

/// A model that can assign categories to a memory
///
/// Implementations make a single attempt; retrying is the caller's concern.
#[async_trait]
pub trait CategoryModel: Send + Sync {
    async fn categorize(&self, memory: &str) -> Result<MemoryCategories>;
}
