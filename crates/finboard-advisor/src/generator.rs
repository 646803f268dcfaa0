//! Text generator client
//!
//! The generator is an opaque collaborator: prompt in, free text out.
//! Output is non-deterministic and best-effort; the advisor validates it
//! after the fact.

use async_trait::async_trait;
use finboard_config::AdvisorConfig;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;

/// Text generation seam
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free text for a prompt
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GeneratorError>;
}

/// OpenAI-compatible chat-completions client
pub struct OpenAiGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiGenerator {
    /// Build a client from the advisor configuration
    pub fn new(config: &AdvisorConfig) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GeneratorError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Text generator returned status {}", status);
            return Err(GeneratorError::Status { status: status.as_u16() });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GeneratorError::EmptyResponse)
    }
}
