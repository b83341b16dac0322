pub mod cases;
pub mod history;
pub mod index;
pub mod recommend;
pub mod strategy;
pub mod taxonomy;
pub mod users;

mod error;

pub use error::{Error, Result};

pub use cases::{CaseDetail, CaseListItem};
pub use history::SearchMode;
pub use index::{BuildOutcome, ScoredDocument};
pub use recommend::{AdviceCase, AdviceRequest, AdviceResponse, TalentMatch};
pub use strategy::DocumentRef;
pub use taxonomy::{IssueOptions, TaxonomyItem};
pub use users::RegisterUserRequest;

use std::{future::Future, pin::Pin, sync::Arc};

use tokio::sync::Mutex;

use itnavi_config::{CompletionProviderConfig, Config, EmbeddingProviderConfig, NotifyConfig};
use itnavi_providers::{completion, embedding, notify};
use itnavi_storage::{
	db::Db,
	qdrant::{EntityClass, QdrantStore},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait Notifier
where
	Self: Send + Sync,
{
	fn notify<'a>(
		&'a self,
		cfg: &'a NotifyConfig,
		body: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<()>>;
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(completion::complete(cfg, prompt))
	}
}

impl Notifier for DefaultProviders {
	fn notify<'a>(
		&'a self,
		cfg: &'a NotifyConfig,
		body: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(notify::notify(cfg, body))
	}
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
	pub notifier: Arc<dyn Notifier>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		completion: Arc<dyn CompletionProvider>,
		notifier: Arc<dyn Notifier>,
	) -> Self {
		Self { embedding, completion, notifier }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), completion: provider.clone(), notifier: provider }
	}
}

pub struct ItnaviService {
	pub cfg: Config,
	pub db: Db,
	pub qdrant: QdrantStore,
	pub providers: Providers,
	// One guard per entity class. Rebuilds are serialized; reads stay
	// lock-free.
	talent_build_lock: Mutex<()>,
	case_build_lock: Mutex<()>,
}
impl ItnaviService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		Self::with_providers(cfg, db, qdrant, Providers::default())
	}

	pub fn with_providers(cfg: Config, db: Db, qdrant: QdrantStore, providers: Providers) -> Self {
		Self {
			cfg,
			db,
			qdrant,
			providers,
			talent_build_lock: Mutex::new(()),
			case_build_lock: Mutex::new(()),
		}
	}

	pub(crate) fn build_lock(&self, class: EntityClass) -> &Mutex<()> {
		match class {
			EntityClass::Talent => &self.talent_build_lock,
			EntityClass::Case => &self.case_build_lock,
		}
	}
}
