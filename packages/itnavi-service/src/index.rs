//! Builds and queries the per-class vector collections. A collection is
//! the persisted unit: a non-forced build that finds its collection in
//! place loads it as-is, a forced build drops and recomputes it.

use std::collections::HashMap;

use qdrant_client::{
	client::Payload,
	qdrant::{
		CreateCollectionBuilder, Distance, PointStruct, Query, QueryPointsBuilder,
		UpsertPointsBuilder, Vector, VectorParamsBuilder, VectorsConfigBuilder, value::Kind,
	},
};
use serde::Serialize;

use crate::{Error, ItnaviService, Result};
use itnavi_chunking::{Chunk, ChunkingConfig};
use itnavi_domain::projection::{self, TalentProfile};
use itnavi_storage::{
	cases,
	qdrant::{DENSE_VECTOR_NAME, EntityClass},
	talents,
};

const UPSERT_BATCH: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum BuildOutcome {
	/// The collection was (re)computed and now holds this many points.
	Built { points: usize },
	/// A persisted collection already existed and the build was not forced.
	Loaded,
	/// The embedding provider is disabled; nothing was built and nothing
	/// was touched.
	Skipped,
}

#[derive(Clone, Debug)]
pub struct ScoredDocument {
	pub text: String,
	pub score: f32,
}

/// One projected document waiting to be chunked and embedded.
struct SourceDocument {
	entity_id: i32,
	text: String,
}

impl ItnaviService {
	pub async fn build_index(&self, class: EntityClass, force_recreate: bool) -> Result<BuildOutcome> {
		let _guard = self.build_lock(class).lock().await;

		if !self.cfg.providers.embedding.enabled {
			tracing::warn!(class = class.as_str(), "Embedding provider disabled; skipping index build.");

			return Ok(BuildOutcome::Skipped);
		}

		let collection = self.qdrant.collection_for(class).to_string();

		if force_recreate {
			// Missing collections are fine here.
			let _ = self.qdrant.client.delete_collection(collection.clone()).await;
		} else {
			let exists = self
				.qdrant
				.client
				.collection_exists(collection.clone())
				.await
				.map_err(|err| Error::Qdrant { message: err.to_string() })?;

			if exists {
				tracing::info!(class = class.as_str(), collection, "Reusing persisted index.");

				return Ok(BuildOutcome::Loaded);
			}
		}

		let documents = self.load_documents(class).await?;
		let chunks = self.chunk_documents(documents);
		let texts: Vec<String> = chunks.iter().map(|(_, _, chunk)| chunk.text.clone()).collect();
		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, &texts)
			.await
			.map_err(|err| Error::BuildFailure { message: format!("Embedding failed: {err}") })?;

		if vectors.len() != texts.len() {
			return Err(Error::BuildFailure {
				message: format!(
					"Embedding count mismatch: {} texts, {} vectors.",
					texts.len(),
					vectors.len()
				),
			});
		}

		let dim = self.qdrant.vector_dim as usize;

		if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
			return Err(Error::BuildFailure {
				message: format!("Embedding dimension mismatch: expected {dim}, got {}.", bad.len()),
			});
		}

		self.create_collection(&collection).await?;

		let mut points = Vec::with_capacity(chunks.len());

		for ((entity_id, chunk_index, chunk), vector) in chunks.iter().zip(vectors) {
			let mut payload = Payload::new();

			payload.insert("entity_id", i64::from(*entity_id));
			payload.insert("chunk_index", i64::from(*chunk_index));
			payload.insert("text", chunk.text.clone());

			let mut vectors_map = HashMap::new();

			vectors_map.insert(DENSE_VECTOR_NAME.to_string(), Vector::from(vector));

			points.push(PointStruct::new(point_id(*entity_id, *chunk_index), vectors_map, payload));
		}

		let total = points.len();

		for batch in points.chunks(UPSERT_BATCH) {
			self.qdrant
				.client
				.upsert_points(
					UpsertPointsBuilder::new(collection.clone(), batch.to_vec()).wait(true),
				)
				.await
				.map_err(|err| Error::BuildFailure { message: format!("Upsert failed: {err}") })?;
		}

		tracing::info!(class = class.as_str(), collection, points = total, "Index built.");

		Ok(BuildOutcome::Built { points: total })
	}

	/// Embeds `text` and returns the `k` nearest documents, best first.
	pub async fn query_index(
		&self,
		class: EntityClass,
		text: &str,
		k: u32,
	) -> Result<Vec<ScoredDocument>> {
		let collection = self.qdrant.collection_for(class).to_string();

		if !self.cfg.providers.embedding.enabled {
			return Err(Error::IndexUnavailable { collection });
		}

		let exists = self
			.qdrant
			.client
			.collection_exists(collection.clone())
			.await
			.map_err(|err| Error::Qdrant { message: err.to_string() })?;

		if !exists {
			return Err(Error::IndexUnavailable { collection });
		}

		let vectors = self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&text.to_string()))
			.await?;
		let vector = vectors
			.into_iter()
			.next()
			.ok_or_else(|| Error::Provider { message: "Empty embedding response.".to_string() })?;
		let query = QueryPointsBuilder::new(collection)
			.query(Query::new_nearest(vector))
			.using(DENSE_VECTOR_NAME)
			.with_payload(true)
			.limit(u64::from(k));
		let response = self
			.qdrant
			.client
			.query(query)
			.await
			.map_err(|err| Error::Qdrant { message: err.to_string() })?;
		let documents = response
			.result
			.into_iter()
			.filter_map(|point| {
				let text = payload_text(&point.payload)?;

				Some(ScoredDocument { text, score: point.score })
			})
			.collect();

		Ok(documents)
	}

	async fn load_documents(&self, class: EntityClass) -> Result<Vec<SourceDocument>> {
		let documents = match class {
			EntityClass::Talent => talents::load_visible_bundles(&self.db)
				.await?
				.into_iter()
				.map(|bundle| {
					let profile = TalentProfile {
						talent_id: bundle.talent.talent_id,
						name: bundle.talent.talent_name,
						summary: bundle.talent.summary,
						industry: bundle.industry_name.unwrap_or_default(),
						careers: bundle.careers,
						mindsets: bundle.mindsets,
						supportareas: bundle.supportareas,
						jobs: bundle.jobs,
						hashtags: bundle.hashtags,
					};

					SourceDocument {
						entity_id: profile.talent_id,
						text: projection::project_talent(&profile),
					}
				})
				.collect(),
			EntityClass::Case => cases::list_visible_full(&self.db)
				.await?
				.into_iter()
				.map(|case| {
					let record = projection::CaseRecord {
						case_id: case.case_id,
						case_name: case.case_name,
						case_summary: case.case_summary,
						company_summary: case.company_summary,
						initiative_summary: case.initiative_summary,
						issue_background: case.issue_background,
						solution_method: case.solution_method,
					};

					SourceDocument {
						entity_id: record.case_id,
						text: projection::project_case(&record),
					}
				})
				.collect(),
		};

		Ok(documents)
	}

	fn chunk_documents(&self, documents: Vec<SourceDocument>) -> Vec<(i32, i32, Chunk)> {
		let chunking = &self.cfg.chunking;
		let mut out = Vec::with_capacity(documents.len());

		for document in documents {
			if chunking.enabled {
				let cfg = ChunkingConfig {
					max_chars: chunking.max_chars,
					carry_lead_section: chunking.carry_lead_section,
				};

				for chunk in itnavi_chunking::split_document(&document.text, &cfg) {
					out.push((document.entity_id, chunk.chunk_index, chunk));
				}
			} else {
				out.push((
					document.entity_id,
					0,
					Chunk { chunk_index: 0, text: document.text },
				));
			}
		}

		out
	}

	async fn create_collection(&self, collection: &str) -> Result<()> {
		let mut vectors_config = VectorsConfigBuilder::default();

		vectors_config.add_named_vector_params(
			DENSE_VECTOR_NAME,
			VectorParamsBuilder::new(u64::from(self.qdrant.vector_dim), Distance::Cosine),
		);

		let builder =
			CreateCollectionBuilder::new(collection.to_string()).vectors_config(vectors_config);

		self.qdrant
			.client
			.create_collection(builder)
			.await
			.map_err(|err| Error::BuildFailure { message: format!("Create collection failed: {err}") })?;

		Ok(())
	}
}

/// Deterministic point id so a rebuild upserts over the previous points
/// instead of duplicating them.
fn point_id(entity_id: i32, chunk_index: i32) -> u64 {
	(entity_id as u64) << 16 | (chunk_index as u64 & 0xFFFF)
}

fn payload_text(payload: &HashMap<String, qdrant_client::qdrant::Value>) -> Option<String> {
	let value = payload.get("text")?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.clone()),
		_ => None,
	}
}
