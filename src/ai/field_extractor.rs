//! Field extraction via the OpenAI chat API
//!
//! Extraction failures never abort CV processing. Any request or parse
//! failure is logged and reported as empty fields so the experience
//! pipeline still runs.

use crate::ai::prompts::PromptTemplates;
use crate::config::AiConfig;
use crate::error::{CvExtractError, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Identity fields pulled from a CV by the language model.
///
/// Matches the JSON shape the model is asked for, so a reply with
/// missing keys still deserializes with the absent fields empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFields {
    #[serde(default, rename = "Name")]
    pub name: String,
    #[serde(default, rename = "Nationality")]
    pub nationality: String,
    #[serde(default, rename = "Qualification")]
    pub qualification: String,
}

/// Pulls identity fields out of CV text
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Extract fields from a CV text blob, returning empty fields on
    /// any upstream failure
    async fn extract_fields(&self, cv_text: &str) -> CandidateFields;
}

/// Field extractor backed by the OpenAI chat completion API
pub struct OpenAiFieldExtractor {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    templates: PromptTemplates,
}

impl OpenAiFieldExtractor {
    /// Build an extractor from AI settings, reading the API key from
    /// the `OPENAI_API_KEY` environment variable
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            client: Client::new(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            templates: PromptTemplates::default(),
        }
    }

    async fn request_fields(&self, cv_text: &str) -> Result<CandidateFields> {
        let prompt = self.templates.render_field_extraction(cv_text);

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| CvExtractError::FieldExtraction(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![ChatCompletionRequestMessage::User(message)])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| CvExtractError::FieldExtraction(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| CvExtractError::FieldExtraction(e.to_string()))?;

        let reply = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                CvExtractError::FieldExtraction("model returned no content".to_string())
            })?;

        parse_fields_reply(&reply)
    }
}

#[async_trait]
impl FieldExtractor for OpenAiFieldExtractor {
    async fn extract_fields(&self, cv_text: &str) -> CandidateFields {
        match self.request_fields(cv_text).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(
                    "Field extraction failed, continuing with empty fields: {}",
                    e
                );
                CandidateFields::default()
            }
        }
    }
}

/// Stand-in extractor used when AI extraction is turned off
pub struct DisabledFieldExtractor;

#[async_trait]
impl FieldExtractor for DisabledFieldExtractor {
    async fn extract_fields(&self, _cv_text: &str) -> CandidateFields {
        CandidateFields::default()
    }
}

/// Check whether an OpenAI API key is present in the environment
pub fn api_key_available() -> bool {
    std::env::var("OPENAI_API_KEY")
        .map(|key| !key.trim().is_empty())
        .unwrap_or(false)
}

/// Choose a field extractor for the current run
pub fn build_field_extractor(config: &AiConfig, no_ai: bool) -> Box<dyn FieldExtractor> {
    if no_ai || !config.enabled {
        info!("AI field extraction disabled");
        return Box::new(DisabledFieldExtractor);
    }
    if !api_key_available() {
        warn!("OPENAI_API_KEY is not set, skipping AI field extraction");
        return Box::new(DisabledFieldExtractor);
    }
    Box::new(OpenAiFieldExtractor::from_config(config))
}

fn parse_fields_reply(reply: &str) -> Result<CandidateFields> {
    let body = strip_code_fence(reply);
    let fields = serde_json::from_str(body)?;
    Ok(fields)
}

/// Models often wrap JSON replies in a markdown code fence
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}
