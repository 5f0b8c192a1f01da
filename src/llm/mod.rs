//! Shared chat-completion client for OpenAI-compatible providers.

use std::{env, fmt};

use anyhow::{Context, Result, anyhow, bail};
use reqwest::Client;
use serde::Deserialize;

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const POE_ENDPOINT: &str = "https://api.poe.com/v1/chat/completions";

/// Enumerates the supported LLM backends behind the shared client.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LlmProvider {
    OpenRouter,
    Poe,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenRouter => write!(f, "openrouter"),
            LlmProvider::Poe => write!(f, "poe"),
        }
    }
}

/// Defines the shape of a chat-style interaction with an LLM.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl LlmRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

/// Individual chat message, compatible with OpenAI compliant providers.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Supported chat roles passed to providers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Response surface returned to callers.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: LlmProvider,
    pub model: String,
}

/// Main entry point for invoking providers.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
}

#[derive(Clone, Default)]
struct LlmConfig {
    openrouter_api_key: Option<String>,
    poe_api_key: Option<String>,
    openrouter_referer: Option<String>,
    openrouter_title: Option<String>,
}

impl LlmClient {
    /// Build a client using environment variables.
    pub fn from_env() -> Result<Self> {
        let openrouter_api_key = env::var("OPENROUTER_API_KEY").ok();
        let poe_api_key = env::var("POE_API_KEY").ok();
        let openrouter_referer = env::var("OPENROUTER_HTTP_REFERER").ok();
        let openrouter_title = env::var("OPENROUTER_X_TITLE").ok();

        Ok(Self {
            http: Client::new(),
            config: LlmConfig {
                openrouter_api_key,
                poe_api_key,
                openrouter_referer,
                openrouter_title,
            },
        })
    }

    /// Execute a request against the provider encoded in the model name.
    pub async fn execute(&self, request: LlmRequest) -> Result<LlmResponse> {
        let model = request.model.clone();
        let (provider, provider_model) = parse_model_provider(&model)?;

        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": msg.text,
                })
            })
            .collect();

        let payload = serde_json::json!({
            "model": provider_model,
            "messages": messages,
        });

        let req_builder = match provider {
            LlmProvider::OpenRouter => {
                let Some(api_key) = self.config.openrouter_api_key.as_ref() else {
                    bail!(
                        "OPENROUTER_API_KEY is not configured but required for OpenRouter requests"
                    );
                };
                let mut builder = self
                    .http
                    .post(OPENROUTER_ENDPOINT)
                    .bearer_auth(api_key)
                    .json(&payload);
                if let Some(referer) = &self.config.openrouter_referer {
                    builder = builder.header("HTTP-Referer", referer);
                }
                if let Some(title) = &self.config.openrouter_title {
                    builder = builder.header("X-Title", title);
                }
                builder
            }
            LlmProvider::Poe => {
                let Some(api_key) = self.config.poe_api_key.as_ref() else {
                    bail!("POE_API_KEY is not configured but required for Poe requests");
                };
                self.http
                    .post(POE_ENDPOINT)
                    .bearer_auth(api_key)
                    .json(&payload)
            }
        };

        let response = req_builder.send().await?;
        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("failed to read response body")?;
        let body: serde_json::Value = serde_json::from_str(&response_text).with_context(|| {
            let preview = if response_text.len() > 500 {
                format!("{}...", &response_text[..500])
            } else {
                response_text.clone()
            };
            format!(
                "failed to parse {} response as JSON. Response body: {}",
                provider, preview
            )
        })?;
        if !status.is_success() {
            bail!("{} call failed with status {}: {}", provider, status, body);
        }

        let text = extract_completion_text(&body)
            .ok_or_else(|| anyhow!("unexpected {} response payload: {}", provider, body))?;

        Ok(LlmResponse {
            text,
            provider,
            model: provider_model.to_string(),
        })
    }
}

/// Extract assistant text from a Chat Completions payload.
fn extract_completion_text(value: &serde_json::Value) -> Option<String> {
    let chat = serde_json::from_value::<ChatCompletionPayload>(value.clone()).ok()?;
    chat.choices
        .into_iter()
        .find_map(|choice| choice.message.content)
}

fn parse_model_provider(model: &str) -> Result<(LlmProvider, &str)> {
    let (provider, name) = model.split_once('/').ok_or_else(|| {
        anyhow!("model must be prefixed with provider, e.g. 'openrouter/openai/gpt-4o'")
    })?;

    if name.trim().is_empty() {
        bail!("model name is required after provider prefix");
    }

    match provider {
        "openrouter" => Ok((LlmProvider::OpenRouter, name)),
        "poe" => Ok((LlmProvider::Poe, name)),
        other => bail!("unsupported provider prefix: {other}"),
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionPayload {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_strings_carry_a_provider_prefix() {
        let (provider, model) = parse_model_provider("openrouter/openai/gpt-4o-mini").unwrap();
        assert_eq!(provider, LlmProvider::OpenRouter);
        assert_eq!(model, "openai/gpt-4o-mini");

        let (provider, model) = parse_model_provider("poe/claude-3-haiku").unwrap();
        assert_eq!(provider, LlmProvider::Poe);
        assert_eq!(model, "claude-3-haiku");
    }

    #[test]
    fn unprefixed_or_unknown_models_are_rejected() {
        assert!(parse_model_provider("gpt-4o").is_err());
        assert!(parse_model_provider("openrouter/").is_err());
        assert!(parse_model_provider("acme/some-model").is_err());
    }

    #[test]
    fn completion_text_is_taken_from_the_first_choice_with_content() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "hello there" } }
            ]
        });
        assert_eq!(
            extract_completion_text(&body),
            Some("hello there".to_string())
        );
        assert_eq!(extract_completion_text(&serde_json::json!({})), None);
    }
}
