use crate::{Error, ItnaviService, Result};
use itnavi_domain::resolution::ResolutionKind;
use itnavi_storage::{
	history::{self, ResolutionSlot},
	models::{SearchStep, StepFilters},
};

/// Search mode recorded on the session row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
	Case,
	Talent,
	Advice,
}
impl SearchMode {
	pub fn code(self) -> i32 {
		match self {
			Self::Case => 0,
			Self::Talent => 1,
			Self::Advice => 2,
		}
	}
}

fn slot_for(kind: ResolutionKind) -> ResolutionSlot {
	match kind {
		ResolutionKind::Case => ResolutionSlot::Case,
		ResolutionKind::Job => ResolutionSlot::Job,
		ResolutionKind::Talent => ResolutionSlot::Talent,
	}
}

impl ItnaviService {
	pub async fn create_session(&self, mode: SearchMode) -> Result<i32> {
		Ok(history::insert_search(&self.db, mode.code()).await?)
	}

	/// Appends a filter step to the session and returns its sub id (counts
	/// up from 1 per session).
	pub async fn append_step(&self, search_id: i32, filters: StepFilters) -> Result<i32> {
		Ok(history::insert_step(&self.db, search_id, &filters).await?)
	}

	pub async fn get_step(&self, search_id: i32, search_id_sub: i32) -> Result<SearchStep> {
		Ok(history::get_step(&self.db, search_id, search_id_sub).await?)
	}

	/// Attaches a resolved entity to the step; an occupied slot forks a new
	/// step. Returns the sub id the resolution landed on.
	pub async fn attach_resolution(
		&self,
		search_id: i32,
		search_id_sub: i32,
		kind: ResolutionKind,
		id: i32,
	) -> Result<i32> {
		if id <= 0 {
			return Err(Error::InvalidRequest {
				message: format!("{} id must be positive.", kind.as_str()),
			});
		}

		Ok(history::attach_resolution(&self.db, search_id, search_id_sub, slot_for(kind), id)
			.await?)
	}

	/// The entity name the step resolved to, preferring the case slot.
	/// Steps with neither a case nor a job cannot drive a talent search.
	pub(crate) async fn resolved_entity_name(&self, step: &SearchStep) -> Result<String> {
		if let Some(case_id) = step.case_id {
			let case = itnavi_storage::cases::get(&self.db, case_id).await?;

			return Ok(case.case_name);
		}

		if let Some(job_id) = step.job_id {
			let job = itnavi_storage::taxonomy::get_entry(
				&self.db,
				itnavi_storage::taxonomy::Taxonomy::Job,
				job_id,
			)
			.await?;

			return Ok(job.name);
		}

		Err(Error::NotFound {
			message: format!(
				"No case or job resolved for step ({}, {}).",
				step.search_id, step.search_id_sub
			),
		})
	}
}
