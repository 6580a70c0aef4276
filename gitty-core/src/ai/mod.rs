//! Commit message generation over the OpenAI and Anthropic HTTP APIs.

pub mod anthropic;
pub mod openai;

use crate::config::{AiConfig, AiProvider};
use anyhow::{Context, Result};
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const SYSTEM_PROMPT: &str = "You are an expert software engineer who writes clear, \
conventional git commit messages.

Rules:
- First line: a concise summary of at most 50 characters, prefixed with one of \
feat, fix, refactor, docs, style, test or chore (e.g. \"feat: add login form\")
- Then a blank line
- Then a short bulleted body (\"- \" bullets) describing what changed and why
- Use the imperative mood
- Return raw text only. Do NOT wrap in markdown code blocks.";

const TRUNCATION_MARKER: &str = "\n...(truncated)";

/// Cut `diff` to at most `max_bytes` bytes (on a char boundary) and mark it.
pub fn truncate_diff(diff: &str, max_bytes: usize) -> String {
    if diff.len() <= max_bytes {
        return diff.to_string();
    }
    let mut end = max_bytes;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATION_MARKER}", &diff[..end])
}

pub fn user_prompt(diff: &str) -> String {
    format!("Generate a commit message for this diff:\n\n{diff}")
}

/// Remove markdown fences models add despite being asked not to.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```markdown", "")
        .replace("```", "")
        .trim()
        .to_string()
}

pub(crate) fn http_client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

/// Read the body of a finished request, turning non-2xx statuses into errors.
pub(crate) fn read_body(response: reqwest::blocking::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().context("failed to read response body")?;
    if !status.is_success() {
        anyhow::bail!("API error {}: {}", status.as_u16(), body.trim());
    }
    Ok(body)
}

/// Ask the configured provider for a commit message describing `diff`.
pub fn generate_commit_message(diff: &str, config: &AiConfig) -> Result<String> {
    if config.api_key.trim().is_empty() {
        anyhow::bail!(
            "API key not configured. Set ai.api_key in the config file or export {}",
            config.provider.api_key_env()
        );
    }

    let diff = truncate_diff(diff, config.max_diff_size);
    let prompt = user_prompt(&diff);
    log::info!(
        "requesting commit message from {:?} ({} byte diff)",
        config.provider,
        diff.len()
    );

    let raw = match config.provider {
        AiProvider::OpenAi => openai::complete(config, &prompt)?,
        AiProvider::Anthropic => anthropic::complete(config, &prompt)?,
    };
    Ok(strip_code_fences(&raw))
}
