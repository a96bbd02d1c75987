//! Structured response schema for memory categories

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{CategorizeError, Result};

/// Name of the structured output format sent to the provider
pub const SCHEMA_NAME: &str = "MemoryCategories";

/// Categories returned by the model, before normalization
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemoryCategories {
    pub categories: Vec<String>,
}

impl MemoryCategories {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// JSON schema requesting `{ "categories": [string] }` and nothing else
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "categories": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["categories"],
            "additionalProperties": false
        })
    }

    /// Parse model output, keeping the raw text on failure
    pub fn from_content(content: &str) -> Result<Self> {
        serde_json::from_str(strip_code_fence(content)).map_err(|source| {
            CategorizeError::Schema {
                raw: content.to_string(),
                source,
            }
        })
    }
}

/// Some OpenAI-compatible providers wrap JSON output in a markdown fence
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
