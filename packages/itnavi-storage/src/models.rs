use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TaxonomyEntry {
	pub id: i32,
	pub name: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CaseSummary {
	pub case_id: i32,
	pub case_name: String,
	pub case_summary: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Case {
	pub case_id: i32,
	pub case_name: String,
	pub case_summary: String,
	pub company_summary: String,
	pub initiative_summary: String,
	pub issue_background: String,
	pub solution_method: String,
	pub display_order: i32,
	pub is_visible: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Talent {
	pub talent_id: i32,
	pub talent_name: String,
	pub summary: String,
	pub industry_id: Option<i32>,
	pub display_order: i32,
	pub is_visible: bool,
}

/// A talent row joined with its display-ordered children, ready for
/// document projection.
#[derive(Debug, Clone)]
pub struct TalentBundle {
	pub talent: Talent,
	pub industry_name: Option<String>,
	pub careers: Vec<String>,
	pub mindsets: Vec<String>,
	pub supportareas: Vec<String>,
	pub jobs: Vec<String>,
	pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchSession {
	pub search_id: i32,
	pub user_id: Option<i32>,
	pub search_mode: i32,
	pub searched_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchStep {
	pub search_id: i32,
	pub search_id_sub: i32,
	pub industry_id: Option<i32>,
	pub company_size_id: Option<i32>,
	pub department_id: Option<i32>,
	pub theme_id: Option<i32>,
	pub case_id: Option<i32>,
	pub job_id: Option<i32>,
	pub talent_id: Option<i32>,
	pub searched_at: OffsetDateTime,
}

/// Taxonomy filters of one history step. All `None` means an unfiltered
/// step.
#[derive(Debug, Clone, Default)]
pub struct StepFilters {
	pub industry_id: Option<i32>,
	pub company_size_id: Option<i32>,
	pub department_id: Option<i32>,
	pub theme_id: Option<i32>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StrategyDocument {
	pub document_id: i32,
	pub search_id: i32,
	pub search_id_sub: i32,
	pub content: String,
	pub status: String,
	pub created_at: OffsetDateTime,
	pub downloaded_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
	pub user_name: String,
	pub company_name: String,
	pub email: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	pub user_id: i32,
	pub user_name: String,
	pub company_name: String,
	pub email: String,
	pub created_at: OffsetDateTime,
}
