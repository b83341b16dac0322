use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use itnavi_domain::resolution::ResolutionKind;
use itnavi_service::{
	AdviceRequest, AdviceResponse, BuildOutcome, CaseDetail, CaseListItem, DocumentRef,
	Error as ServiceError, IssueOptions, RegisterUserRequest, SearchMode, TalentMatch,
	TaxonomyItem,
};
use itnavi_storage::{models::StepFilters, qdrant::EntityClass, taxonomy::Taxonomy};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/taxonomies/industries", get(industries))
		.route("/v1/taxonomies/company-sizes", get(company_sizes))
		.route("/v1/taxonomies/departments", get(departments))
		.route("/v1/taxonomies/themes", get(themes))
		.route("/v1/taxonomies/jobs", get(jobs))
		.route("/v1/issues", get(issues))
		.route("/v1/case-search", post(start_case_search))
		.route("/v1/case-search/{search_id}/{search_id_sub}/cases", get(case_list))
		.route("/v1/case-search/{search_id}/{search_id_sub}/detail", get(case_detail))
		.route("/v1/case-search/select", post(select_case))
		.route("/v1/job-search/select", post(select_job))
		.route("/v1/cases/featured", get(featured_cases))
		.route("/v1/advice", post(advice))
		.route("/v1/talent-search", post(talent_search))
		.route("/v1/users", post(register_user))
		.route("/v1/agent-support", post(agent_support))
		.route("/v1/strategy", post(create_strategy))
		.route("/v1/strategy/{search_id}/{search_id_sub}/{document_id}", get(get_strategy))
		.route("/v1/strategy/download", post(confirm_download))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/rebuild_index", post(rebuild_index)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn industries(State(state): State<AppState>) -> Result<Json<Vec<TaxonomyItem>>, ApiError> {
	Ok(Json(state.service.list_taxonomy(Taxonomy::Industry).await?))
}

async fn company_sizes(State(state): State<AppState>) -> Result<Json<Vec<TaxonomyItem>>, ApiError> {
	Ok(Json(state.service.list_taxonomy(Taxonomy::CompanySize).await?))
}

async fn departments(State(state): State<AppState>) -> Result<Json<Vec<TaxonomyItem>>, ApiError> {
	Ok(Json(state.service.list_taxonomy(Taxonomy::Department).await?))
}

async fn themes(State(state): State<AppState>) -> Result<Json<Vec<TaxonomyItem>>, ApiError> {
	Ok(Json(state.service.list_taxonomy(Taxonomy::Theme).await?))
}

async fn jobs(State(state): State<AppState>) -> Result<Json<Vec<TaxonomyItem>>, ApiError> {
	Ok(Json(state.service.list_taxonomy(Taxonomy::Job).await?))
}

async fn issues(State(state): State<AppState>) -> Result<Json<IssueOptions>, ApiError> {
	Ok(Json(state.service.all_issues().await?))
}

#[derive(Debug, Deserialize)]
struct CaseSearchRequest {
	/// Omitted for a fresh search; present to append a refined step to an
	/// existing session.
	search_id: Option<i32>,
	industry_id: Option<i32>,
	company_size_id: Option<i32>,
	department_id: Option<i32>,
	theme_id: Option<i32>,
}

#[derive(Debug, Serialize)]
struct StepRef {
	search_id: i32,
	search_id_sub: i32,
}

async fn start_case_search(
	State(state): State<AppState>,
	Json(payload): Json<CaseSearchRequest>,
) -> Result<Json<StepRef>, ApiError> {
	let search_id = match payload.search_id {
		Some(search_id) => search_id,
		None => state.service.create_session(SearchMode::Case).await?,
	};
	let filters = StepFilters {
		industry_id: payload.industry_id,
		company_size_id: payload.company_size_id,
		department_id: payload.department_id,
		theme_id: payload.theme_id,
	};
	let search_id_sub = state.service.append_step(search_id, filters).await?;

	Ok(Json(StepRef { search_id, search_id_sub }))
}

async fn case_list(
	State(state): State<AppState>,
	Path((search_id, search_id_sub)): Path<(i32, i32)>,
) -> Result<Json<Vec<CaseListItem>>, ApiError> {
	Ok(Json(state.service.case_list(search_id, search_id_sub).await?))
}

async fn case_detail(
	State(state): State<AppState>,
	Path((search_id, search_id_sub)): Path<(i32, i32)>,
) -> Result<Json<CaseDetail>, ApiError> {
	Ok(Json(state.service.case_detail(search_id, search_id_sub).await?))
}

#[derive(Debug, Deserialize)]
struct SelectCaseRequest {
	search_id: i32,
	search_id_sub: i32,
	case_id: i32,
}

#[derive(Debug, Serialize)]
struct SelectResponse {
	search_id_sub: i32,
}

async fn select_case(
	State(state): State<AppState>,
	Json(payload): Json<SelectCaseRequest>,
) -> Result<Json<SelectResponse>, ApiError> {
	let search_id_sub = state
		.service
		.attach_resolution(
			payload.search_id,
			payload.search_id_sub,
			ResolutionKind::Case,
			payload.case_id,
		)
		.await?;

	Ok(Json(SelectResponse { search_id_sub }))
}

#[derive(Debug, Deserialize)]
struct SelectJobRequest {
	search_id: i32,
	search_id_sub: i32,
	job_id: i32,
}

async fn select_job(
	State(state): State<AppState>,
	Json(payload): Json<SelectJobRequest>,
) -> Result<Json<SelectResponse>, ApiError> {
	let search_id_sub = state
		.service
		.attach_resolution(
			payload.search_id,
			payload.search_id_sub,
			ResolutionKind::Job,
			payload.job_id,
		)
		.await?;

	Ok(Json(SelectResponse { search_id_sub }))
}

async fn featured_cases(
	State(state): State<AppState>,
) -> Result<Json<Vec<CaseListItem>>, ApiError> {
	Ok(Json(state.service.featured_cases().await?))
}

async fn advice(
	State(state): State<AppState>,
	Json(payload): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, ApiError> {
	Ok(Json(state.service.advise(payload).await?))
}

#[derive(Debug, Deserialize)]
struct TalentSearchRequest {
	search_id: i32,
	search_id_sub: i32,
}

async fn talent_search(
	State(state): State<AppState>,
	Json(payload): Json<TalentSearchRequest>,
) -> Result<Json<Vec<TalentMatch>>, ApiError> {
	Ok(Json(
		state.service.recommend_talents(payload.search_id, payload.search_id_sub).await?,
	))
}

#[derive(Debug, Serialize)]
struct UserRef {
	user_id: i32,
}

async fn register_user(
	State(state): State<AppState>,
	Json(payload): Json<RegisterUserRequest>,
) -> Result<Json<UserRef>, ApiError> {
	let user_id = state.service.register_user(payload).await?;

	Ok(Json(UserRef { user_id }))
}

#[derive(Debug, Deserialize)]
struct AgentSupportRequest {
	user_id: i32,
	search_id: i32,
}

#[derive(Debug, Serialize)]
struct AgentSupportResponse {
	request_id: i32,
}

async fn agent_support(
	State(state): State<AppState>,
	Json(payload): Json<AgentSupportRequest>,
) -> Result<Json<AgentSupportResponse>, ApiError> {
	let request_id =
		state.service.request_agent_support(payload.user_id, payload.search_id).await?;

	Ok(Json(AgentSupportResponse { request_id }))
}

#[derive(Debug, Deserialize)]
struct CreateStrategyRequest {
	user_id: i32,
	search_id: i32,
	search_id_sub: i32,
}

async fn create_strategy(
	State(state): State<AppState>,
	Json(payload): Json<CreateStrategyRequest>,
) -> Result<Json<DocumentRef>, ApiError> {
	Ok(Json(
		state
			.service
			.create_document(payload.user_id, payload.search_id, payload.search_id_sub)
			.await?,
	))
}

#[derive(Debug, Serialize)]
struct StrategyContent {
	content: String,
}

async fn get_strategy(
	State(state): State<AppState>,
	Path((search_id, search_id_sub, document_id)): Path<(i32, i32, i32)>,
) -> Result<Json<StrategyContent>, ApiError> {
	let content = state.service.get_document(search_id, search_id_sub, document_id).await?;

	Ok(Json(StrategyContent { content }))
}

#[derive(Debug, Deserialize)]
struct DownloadRequest {
	document_id: i32,
}

async fn confirm_download(
	State(state): State<AppState>,
	Json(payload): Json<DownloadRequest>,
) -> Result<StatusCode, ApiError> {
	state.service.confirm_download(payload.document_id).await?;

	Ok(StatusCode::OK)
}

#[derive(Debug, Deserialize)]
struct RebuildRequest {
	#[serde(default)]
	class: Option<String>,
	#[serde(default)]
	force: bool,
}

#[derive(Debug, Serialize)]
struct RebuildResponse {
	outcomes: Vec<RebuildEntry>,
}

#[derive(Debug, Serialize)]
struct RebuildEntry {
	class: &'static str,
	#[serde(flatten)]
	outcome: BuildOutcome,
}

async fn rebuild_index(
	State(state): State<AppState>,
	Json(payload): Json<RebuildRequest>,
) -> Result<Json<RebuildResponse>, ApiError> {
	let classes: Vec<EntityClass> = match payload.class.as_deref() {
		None => vec![EntityClass::Talent, EntityClass::Case],
		Some("talent") => vec![EntityClass::Talent],
		Some("case") => vec![EntityClass::Case],
		Some(other) =>
			return Err(ApiError::new(
				StatusCode::BAD_REQUEST,
				"invalid_request",
				format!("Unknown entity class {other:?}."),
			)),
	};
	let mut outcomes = Vec::with_capacity(classes.len());

	for class in classes {
		let outcome = state.service.build_index(class, payload.force).await?;

		outcomes.push(RebuildEntry { class: class.as_str(), outcome });
	}

	Ok(Json(RebuildResponse { outcomes }))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();

		match err {
			ServiceError::NotFound { .. } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::InvalidRequest { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::IndexUnavailable { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "index_unavailable", message),
			ServiceError::BuildFailure { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "build_failure", message),
			ServiceError::Provider { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "provider_error", message),
			ServiceError::Storage { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message),
			ServiceError::Qdrant { .. } =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "qdrant_error", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
