//! The two retrieval-augmented flows: advice-with-cases and talent
//! matching. Both parse retrieved documents back into structured fields
//! through the shared section grammar.

use serde::{Deserialize, Serialize};

use crate::{Error, ItnaviService, Result, history::SearchMode};
use itnavi_domain::{markers, prompts, sections};
use itnavi_storage::{models::StepFilters, qdrant::EntityClass};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdviceRequest {
	pub timing: Option<String>,
	pub domain: Option<String>,
	pub free_word: Option<String>,
}

/// A case parsed out of one retrieved document. Fields a truncated chunk
/// did not carry come back empty.
#[derive(Clone, Debug, Serialize)]
pub struct AdviceCase {
	pub id: String,
	pub title: String,
	pub summary: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdviceResponse {
	pub search_id: i32,
	pub search_id_sub: i32,
	pub advice: String,
	pub retrieval_query: String,
	pub cases: Vec<AdviceCase>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TalentMatch {
	pub name: String,
	pub summary: String,
	pub industry: String,
	pub career: Vec<String>,
	pub mindset: Vec<String>,
	pub supportarea: Vec<String>,
	pub job: Vec<String>,
	pub hashtag: Vec<String>,
}

impl ItnaviService {
	/// Generates advisory text plus a retrieval query, then fetches the
	/// closest cases. A disabled completion provider or missing markers
	/// degrade to the configured placeholders; a missing case index
	/// degrades to an empty case list. Neither is an error.
	pub async fn advise(&self, request: AdviceRequest) -> Result<AdviceResponse> {
		let search_id = self.create_session(SearchMode::Advice).await?;
		let search_id_sub = self.append_step(search_id, StepFilters::default()).await?;
		let (advice, retrieval_query) = self.generate_advice(&request).await?;
		let top_k = self.cfg.retrieval.top_k;
		let cases = match self.query_index(EntityClass::Case, &retrieval_query, top_k).await {
			Ok(hits) => hits
				.into_iter()
				.map(|hit| {
					let mut fields = sections::parse_sections(&hit.text);

					AdviceCase {
						id: fields.remove("id").unwrap_or_default(),
						title: fields.remove("title").unwrap_or_default(),
						summary: fields.remove("summary").unwrap_or_default(),
					}
				})
				.collect(),
			Err(Error::IndexUnavailable { collection }) => {
				tracing::warn!(collection, "Case index unavailable; returning advice without cases.");

				Vec::new()
			},
			Err(err) => return Err(err),
		};

		Ok(AdviceResponse { search_id, search_id_sub, advice, retrieval_query, cases })
	}

	/// Talents closest to the step's resolved case or job.
	pub async fn recommend_talents(
		&self,
		search_id: i32,
		search_id_sub: i32,
	) -> Result<Vec<TalentMatch>> {
		let step = self.get_step(search_id, search_id_sub).await?;
		let entity_name = self.resolved_entity_name(&step).await?;
		let query = prompts::talent_query(&entity_name);
		let hits =
			self.query_index(EntityClass::Talent, &query, self.cfg.retrieval.top_k).await?;
		let matches = hits
			.into_iter()
			.map(|hit| {
				let mut fields = sections::parse_sections(&hit.text);
				let bullets = |fields: &mut std::collections::BTreeMap<String, String>,
				               key: &str| {
					fields.remove(key).map(|body| sections::parse_bullets(&body)).unwrap_or_default()
				};

				TalentMatch {
					name: fields.remove("name").unwrap_or_default(),
					summary: fields.remove("summary").unwrap_or_default(),
					industry: fields.remove("industry").unwrap_or_default(),
					career: bullets(&mut fields, "career"),
					mindset: bullets(&mut fields, "mindset"),
					supportarea: bullets(&mut fields, "supportarea"),
					job: bullets(&mut fields, "job"),
					hashtag: bullets(&mut fields, "hashtag"),
				}
			})
			.collect();

		Ok(matches)
	}

	async fn generate_advice(&self, request: &AdviceRequest) -> Result<(String, String)> {
		let cfg = &self.cfg.providers.completion;

		if !cfg.enabled {
			tracing::info!("Completion provider disabled; using placeholder advice.");

			return Ok((cfg.placeholder_advice.clone(), cfg.placeholder_retrieval_query.clone()));
		}

		let ctx = prompts::AdviceContext {
			timing: request.timing.clone(),
			domain: request.domain.clone(),
			free_word: request.free_word.clone(),
		};
		let prompt = prompts::advice_prompt(&ctx);
		let output = self.providers.completion.complete(cfg, &prompt).await?;
		let advice = markers::extract_between(&output, markers::ADVICE_START, markers::ADVICE_END)
			.map(str::to_string)
			.unwrap_or_else(|| {
				tracing::warn!("Advice markers missing from model output; using placeholder.");

				cfg.placeholder_advice.clone()
			});
		let retrieval_query =
			markers::extract_between(&output, markers::PROMPT_START, markers::PROMPT_END)
				.map(str::to_string)
				.unwrap_or_else(|| {
					tracing::warn!("Prompt markers missing from model output; using placeholder.");

					cfg.placeholder_retrieval_query.clone()
				});

		Ok((advice, retrieval_query))
	}
}
