use super::{SYSTEM_PROMPT, http_client, read_body};
use crate::config::AiConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const API_VERSION: &str = "2023-06-01";
pub const FALLBACK_MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<Message<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// The configured model, unless it is clearly meant for another provider.
pub fn model_for(config: &AiConfig) -> &str {
    if config.model.starts_with("claude") {
        &config.model
    } else {
        FALLBACK_MODEL
    }
}

pub fn build_request<'a>(config: &'a AiConfig, prompt: &'a str) -> MessagesRequest<'a> {
    MessagesRequest {
        model: model_for(config),
        max_tokens: MAX_TOKENS,
        system: SYSTEM_PROMPT,
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
        temperature: config.temperature,
    }
}

pub fn parse_response(body: &str) -> Result<String> {
    let response: MessagesResponse =
        serde_json::from_str(body).context("failed to decode Anthropic response")?;
    if let Some(error) = response.error {
        anyhow::bail!("Anthropic error: {}", error.message);
    }
    response
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .context("no response from Anthropic")
}

pub(super) fn complete(config: &AiConfig, prompt: &str) -> Result<String> {
    let response = http_client()?
        .post(ENDPOINT)
        .header("x-api-key", &config.api_key)
        .header("anthropic-version", API_VERSION)
        .json(&build_request(config, prompt))
        .send()
        .context("request to Anthropic failed")?;
    parse_response(&read_body(response)?)
}
