use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

/// Sends one user prompt to the chat-completion endpoint and returns the
/// first choice's content as plain text. Marker extraction and fallback
/// handling belong to the caller.
pub async fn complete(cfg: &itnavi_config::CompletionProviderConfig, prompt: &str) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"messages": [{ "role": "user", "content": prompt }],
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_content(json)
}

fn parse_completion_content(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| eyre::eyre!("Completion response is missing message content."))?;

	Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_first_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "content": "  生成されたテキスト  " } }
			]
		});

		assert_eq!(parse_completion_content(json).expect("parse failed"), "生成されたテキスト");
	}

	#[test]
	fn missing_content_is_an_error() {
		let json = serde_json::json!({ "choices": [] });

		assert!(parse_completion_content(json).is_err());
	}
}
