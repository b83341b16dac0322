mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Chunking, CompletionProviderConfig, Config, EmbeddingProviderConfig, NotifyConfig, Postgres,
	Providers, Qdrant, Retrieval, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.talent_collection.trim().is_empty()
		|| cfg.storage.qdrant.case_collection.trim().is_empty()
	{
		return Err(Error::Validation {
			message: "storage.qdrant collections must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.talent_collection == cfg.storage.qdrant.case_collection {
		return Err(Error::Validation {
			message: "storage.qdrant.talent_collection and case_collection must differ."
				.to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.embedding.enabled && cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty when enabled.".to_string(),
		});
	}
	if cfg.providers.completion.enabled && cfg.providers.completion.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.completion.api_key must be non-empty when enabled.".to_string(),
		});
	}
	if cfg.providers.notify.enabled && cfg.providers.notify.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.notify.url must be non-empty when enabled.".to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.featured_count == 0 {
		return Err(Error::Validation {
			message: "retrieval.featured_count must be greater than zero.".to_string(),
		});
	}
	if cfg.chunking.enabled && cfg.chunking.max_chars == 0 {
		return Err(Error::Validation {
			message: "chunking.max_chars must be greater than zero when chunking is enabled."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.storage.qdrant.talent_collection =
		cfg.storage.qdrant.talent_collection.trim().to_string();
	cfg.storage.qdrant.case_collection = cfg.storage.qdrant.case_collection.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
