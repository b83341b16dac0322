use std::sync::Arc;

use itnavi_service::ItnaviService;
use itnavi_storage::{db::Db, qdrant::QdrantStore};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ItnaviService>,
}
impl AppState {
	pub async fn new(config: itnavi_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&config.storage.qdrant)?;
		let service = ItnaviService::new(config, db, qdrant);

		Ok(Self { service: Arc::new(service) })
	}
}
