//! memory_categorizer: tag memories with topical categories
//!
//! This library provides:
//! - Client configuration resolved from environment (SiliconFlow or OpenAI)
//! - A structured-output model client for OpenAI-compatible APIs
//! - Bounded retry with exponential backoff
//! - A `Categorizer` returning normalized, lowercase category labels
//!
//! # Example
//!
//! ```no_run
//! use memory_categorizer::{Categorizer, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> memory_categorizer::Result<()> {
//!     let categorizer = Categorizer::new(ClientConfig::from_env()?);
//!
//!     let categories = categorizer
//!         .get_categories_for_memory("Started training for a marathon in May")
//!         .await?;
//!     println!("Categories: {:?}", categories);
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Configuration module
pub mod config;

// Core functionality
pub mod categorizer;
pub mod model;
pub mod retry;

pub use error::{CategorizeError, Result};

// Config re-exports
pub use config::{ClientConfig, Provider, MEMORY_CATEGORIZATION_PROMPT};

// Model re-exports
pub use model::{CategoryModel, MemoryCategories, MockModel, ModelClient};

// Retry re-exports
pub use retry::RetryPolicy;

// Categorizer re-exports
pub use categorizer::{
    get_categories_for_memory, normalize_categories, shared_categorizer, Categorizer,
};
