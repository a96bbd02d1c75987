//! Configuration module for memory_categorizer
//!
//! This module contains:
//! - `client`: API credentials, endpoint and model resolved from environment
//! - `prompts`: System prompt for the categorization task

mod client;
mod prompts;

pub use client::{
    ClientConfig, Provider, DEFAULT_MODEL, OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV,
    SILICONFLOW_API_KEY_ENV, SILICONFLOW_BASE_URL, SILICONFLOW_MODEL,
};
pub use prompts::MEMORY_CATEGORIZATION_PROMPT;
