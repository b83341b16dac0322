pub const DENSE_VECTOR_NAME: &str = "dense";

use crate::Result;

/// The vector store keeps one collection per entity class; talents and
/// cases never share a search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityClass {
	Talent,
	Case,
}
impl EntityClass {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Talent => "talent",
			Self::Case => "case",
		}
	}
}

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub talent_collection: String,
	pub case_collection: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &itnavi_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self {
			client,
			talent_collection: cfg.talent_collection.clone(),
			case_collection: cfg.case_collection.clone(),
			vector_dim: cfg.vector_dim,
		})
	}

	pub fn collection_for(&self, class: EntityClass) -> &str {
		match class {
			EntityClass::Talent => &self.talent_collection,
			EntityClass::Case => &self.case_collection,
		}
	}
}
