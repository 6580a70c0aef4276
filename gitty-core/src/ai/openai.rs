use super::{SYSTEM_PROMPT, http_client, read_body};
use crate::config::AiConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub fn build_request<'a>(config: &'a AiConfig, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: config.temperature,
    }
}

pub fn parse_response(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).context("failed to decode OpenAI response")?;
    if let Some(error) = response.error {
        anyhow::bail!("OpenAI error: {}", error.message);
    }
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .context("no response from OpenAI")
}

pub(super) fn complete(config: &AiConfig, prompt: &str) -> Result<String> {
    let response = http_client()?
        .post(ENDPOINT)
        .bearer_auth(&config.api_key)
        .json(&build_request(config, prompt))
        .send()
        .context("request to OpenAI failed")?;
    parse_response(&read_body(response)?)
}
