use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub retrieval: Retrieval,
	pub chunking: Chunking,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub talent_collection: String,
	pub case_collection: String,
	pub vector_dim: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub completion: CompletionProviderConfig,
	pub notify: NotifyConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub enabled: bool,
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CompletionProviderConfig {
	pub enabled: bool,
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
	/// Fixed advisory text returned when the provider is disabled or markers
	/// are missing from the model output.
	#[serde(default = "default_placeholder_advice")]
	pub placeholder_advice: String,
	/// Fixed retrieval query used under the same degraded conditions.
	#[serde(default = "default_placeholder_query")]
	pub placeholder_retrieval_query: String,
	/// Canned strategy document returned when the provider is disabled.
	#[serde(default = "default_sample_document")]
	pub sample_document: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NotifyConfig {
	pub enabled: bool,
	#[serde(default)]
	pub url: String,
	#[serde(default = "default_notify_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_notify_subject")]
	pub subject: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	pub featured_count: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Chunking {
	pub enabled: bool,
	pub max_chars: u32,
	/// Repeat the document's lead identity section at the head of every
	/// follow-up chunk so each chunk stays parseable on its own.
	#[serde(default = "default_carry_lead_section")]
	pub carry_lead_section: bool,
}

fn default_placeholder_advice() -> String {
	"アドバイス(Sample)".to_string()
}

fn default_placeholder_query() -> String {
	"いい感じの事例を抽出してください".to_string()
}

fn default_sample_document() -> String {
	"# 戦略文書(Sample)\n\n生成プロバイダが無効のためサンプル文書を返しています。".to_string()
}

fn default_notify_timeout_ms() -> u64 {
	5_000
}

fn default_notify_subject() -> String {
	"[ITtripNavi] 新しいエージェント相談希望がありました".to_string()
}

fn default_carry_lead_section() -> bool {
	true
}
