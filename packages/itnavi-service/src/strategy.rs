use serde::Serialize;

use crate::{Error, ItnaviService, Result};
use itnavi_domain::{
	markers,
	prompts::{self, StepContext},
};
use itnavi_storage::{
	cases, docs, history,
	models::SearchStep,
	taxonomy::{self, Taxonomy},
	users,
};

#[derive(Clone, Debug, Serialize)]
pub struct DocumentRef {
	pub document_id: i32,
}

impl ItnaviService {
	/// Generates a strategy document for the step's resolved case and
	/// stores it with status `created`.
	pub async fn create_document(
		&self,
		user_id: i32,
		search_id: i32,
		search_id_sub: i32,
	) -> Result<DocumentRef> {
		// The caller must be a registered user.
		let _user = users::get_user(&self.db, user_id).await?;
		let step = history::get_step(&self.db, search_id, search_id_sub).await?;
		let case_id = step.case_id.ok_or_else(|| Error::NotFound {
			message: format!("No case resolved for step ({search_id}, {search_id_sub})."),
		})?;
		let case = cases::get(&self.db, case_id).await?;
		let ctx = self.step_context(&step).await?;
		let content = self.generate_strategy(&ctx, &case.case_name, &case.case_summary).await?;
		let document_id = docs::insert_document(&self.db, search_id, search_id_sub, &content).await?;

		Ok(DocumentRef { document_id })
	}

	/// Returns the document's content after validating it belongs to the
	/// step.
	pub async fn get_document(
		&self,
		search_id: i32,
		search_id_sub: i32,
		document_id: i32,
	) -> Result<String> {
		let document =
			docs::get_document_for_step(&self.db, search_id, search_id_sub, document_id).await?;

		Ok(document.content)
	}

	pub async fn confirm_download(&self, document_id: i32) -> Result<()> {
		Ok(docs::mark_downloaded(&self.db, document_id).await?)
	}

	async fn step_context(&self, step: &SearchStep) -> Result<StepContext> {
		let mut ctx = StepContext::default();

		if let Some(id) = step.industry_id {
			ctx.industry_name = Some(taxonomy::get_entry(&self.db, Taxonomy::Industry, id).await?.name);
		}
		if let Some(id) = step.company_size_id {
			ctx.company_size_name =
				Some(taxonomy::get_entry(&self.db, Taxonomy::CompanySize, id).await?.name);
		}
		if let Some(id) = step.department_id {
			ctx.department_name =
				Some(taxonomy::get_entry(&self.db, Taxonomy::Department, id).await?.name);
		}
		if let Some(id) = step.theme_id {
			ctx.theme_name = Some(taxonomy::get_entry(&self.db, Taxonomy::Theme, id).await?.name);
		}

		Ok(ctx)
	}

	async fn generate_strategy(
		&self,
		ctx: &StepContext,
		case_name: &str,
		case_summary: &str,
	) -> Result<String> {
		let cfg = &self.cfg.providers.completion;

		if !cfg.enabled {
			tracing::info!("Completion provider disabled; using sample strategy document.");

			return Ok(cfg.sample_document.clone());
		}

		let prompt = prompts::strategy_prompt(ctx, case_name, case_summary);
		let output = self.providers.completion.complete(cfg, &prompt).await?;
		let content =
			markers::extract_between(&output, markers::STRATEGY_START, markers::STRATEGY_END)
				.map(str::to_string)
				.unwrap_or_else(|| {
					tracing::warn!("Strategy markers missing; keeping full model output.");

					output.trim().to_string()
				});

		Ok(content)
	}
}
