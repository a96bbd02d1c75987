//! Model client for categorization using OpenAI-compatible API

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoff;
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::debug;

use super::{CategoryModel, MemoryCategories, SCHEMA_NAME};
use crate::config::{ClientConfig, MEMORY_CATEGORIZATION_PROMPT};
use crate::error::{CategorizeError, Result};

/// Client for requesting memory categories from an OpenAI-compatible model
pub struct ModelClient {
    config: ClientConfig,
    client: Client<OpenAIConfig>,
}

impl ModelClient {
    /// Create a new ModelClient
    pub fn new(config: ClientConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.expose_secret());
        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        // Retrying is handled by the categorizer's RetryPolicy
        let no_backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config).with_backoff(no_backoff);

        Self { config, client }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Test connection to the model API by sending a simple request
    #[allow(deprecated)]
    pub async fn test_connection(&self) -> Result<()> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model_name)
            .max_tokens(5_u32)
            .temperature(0.0_f32)
            .messages(vec![ChatCompletionRequestUserMessageArgs::default()
                .content("Hi")
                .build()?
                .into()])
            .build()?;

        let response = self.client.chat().create(request).await?;

        if response.choices.is_empty() {
            return Err(CategorizeError::EmptyResponse(
                "Received empty response from API".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the structured-output categorization request
    pub fn build_request(&self, memory: &str) -> Result<CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(MEMORY_CATEGORIZATION_PROMPT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(memory)
                .build()?
                .into(),
        ];

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: Some("Topical categories for a memory".to_string()),
                name: SCHEMA_NAME.to_string(),
                schema: Some(MemoryCategories::json_schema()),
                strict: Some(true),
            },
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model_name)
            .messages(messages)
            .response_format(response_format)
            .temperature(0.0_f32)
            .build()?;

        Ok(request)
    }

    /// Extract categories from the first choice of a completion
    pub fn parse_response(response: CreateChatCompletionResponse) -> Result<MemoryCategories> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CategorizeError::EmptyResponse("No choices in response".to_string())
        })?;

        if let Some(refusal) = choice.message.refusal {
            return Err(CategorizeError::Refusal(refusal));
        }

        let content = choice.message.content.ok_or_else(|| {
            CategorizeError::EmptyResponse("No content in response message".to_string())
        })?;

        MemoryCategories::from_content(&content)
    }
}

#[async_trait]
impl CategoryModel for ModelClient {
    async fn categorize(&self, memory: &str) -> Result<MemoryCategories> {
        let request = self.build_request(memory)?;

        debug!(
            model = %self.config.model_name,
            provider = self.config.provider.as_str(),
            "Sending categorization request"
        );

        let response = self.client.chat().create(request).await?;
        Self::parse_response(response)
    }
}
