use serde::Serialize;

use crate::{Error, ItnaviService, Result};
use itnavi_storage::{cases, history, models::CaseSummary};

#[derive(Clone, Debug, Serialize)]
pub struct CaseListItem {
	pub case_id: i32,
	pub case_name: String,
	pub case_summary: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseDetail {
	pub case_id: i32,
	pub case_name: String,
	pub case_summary: String,
	pub company_summary: String,
	pub initiative_summary: String,
	pub issue_background: String,
	pub solution_method: String,
}

fn to_item(row: CaseSummary) -> CaseListItem {
	CaseListItem { case_id: row.case_id, case_name: row.case_name, case_summary: row.case_summary }
}

impl ItnaviService {
	/// Visible cases matching the step's taxonomy filters.
	pub async fn case_list(&self, search_id: i32, search_id_sub: i32) -> Result<Vec<CaseListItem>> {
		let step = history::get_step(&self.db, search_id, search_id_sub).await?;
		let rows = cases::filtered_list(&self.db, &step).await?;

		if rows.is_empty() {
			return Err(Error::NotFound { message: "No matching cases.".to_string() });
		}

		Ok(rows.into_iter().map(to_item).collect())
	}

	pub async fn featured_cases(&self) -> Result<Vec<CaseListItem>> {
		let rows = cases::featured(&self.db, i64::from(self.cfg.retrieval.featured_count)).await?;

		if rows.is_empty() {
			return Err(Error::NotFound { message: "No featured cases.".to_string() });
		}

		Ok(rows.into_iter().map(to_item).collect())
	}

	/// Full record of the case the step resolved to.
	pub async fn case_detail(&self, search_id: i32, search_id_sub: i32) -> Result<CaseDetail> {
		let step = history::get_step(&self.db, search_id, search_id_sub).await?;
		let case_id = step.case_id.ok_or_else(|| Error::NotFound {
			message: format!("No case resolved for step ({search_id}, {search_id_sub})."),
		})?;
		let case = cases::get(&self.db, case_id).await?;

		Ok(CaseDetail {
			case_id: case.case_id,
			case_name: case.case_name,
			case_summary: case.case_summary,
			company_summary: case.company_summary,
			initiative_summary: case.initiative_summary,
			issue_background: case.issue_background,
			solution_method: case.solution_method,
		})
	}
}
