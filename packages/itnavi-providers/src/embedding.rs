use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;

/// A single request may carry many projected documents, so inputs are
/// embedded in fixed-size batches.
const BATCH_SIZE: usize = 64;

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
	index: Option<usize>,
	embedding: Vec<f32>,
}

pub async fn embed(
	cfg: &itnavi_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let mut out = Vec::with_capacity(texts.len());

	for batch in texts.chunks(BATCH_SIZE) {
		let body = serde_json::json!({
			"model": cfg.model,
			"input": batch,
			"dimensions": cfg.dimensions,
		});
		let res = client
			.post(&url)
			.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let response: EmbeddingResponse = res.error_for_status()?.json().await?;

		out.extend(order_batch(response, batch.len())?);
	}

	Ok(out)
}

fn order_batch(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
	if response.data.len() != expected {
		return Err(eyre::eyre!(
			"Embedding response returned {} vectors for {} inputs.",
			response.data.len(),
			expected
		));
	}

	let mut indexed: Vec<(usize, Vec<f32>)> = response
		.data
		.into_iter()
		.enumerate()
		.map(|(fallback, datum)| (datum.index.unwrap_or(fallback), datum.embedding))
		.collect();

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}
