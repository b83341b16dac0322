use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;

/// Posts an operator notification to the configured webhook. Callers that
/// treat delivery as best-effort should log the error instead of
/// propagating it.
pub async fn notify(cfg: &itnavi_config::NotifyConfig, body: &str) -> Result<()> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let payload = serde_json::json!({
		"subject": cfg.subject,
		"body": body,
	});

	client.post(&cfg.url).json(&payload).send().await?.error_for_status()?;

	tracing::info!(url = %cfg.url, "Delivered webhook notification.");

	Ok(())
}
