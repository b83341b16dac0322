use itnavi_domain::resolution::ResolutionKind;
use itnavi_service::{RegisterUserRequest, SearchMode};
use itnavi_storage::models::StepFilters;

use super::{build_service, seed_case, stub_providers, test_config, test_db};

const DIM: u32 = 8;

async fn service_with(
	test_db: &itnavi_testkit::TestDatabase,
	completion_enabled: bool,
	output: &str,
) -> itnavi_service::ItnaviService {
	let mut cfg = test_config(
		test_db.dsn().to_string(),
		"http://127.0.0.1:6334".to_string(),
		DIM,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);

	cfg.providers.completion.enabled = completion_enabled;

	build_service(cfg, stub_providers(DIM, output)).await.expect("Failed to build service.")
}

async fn resolved_step(service: &itnavi_service::ItnaviService) -> (i32, i32) {
	seed_case(&service.db.pool, 1, "受発注DX", "受発注業務をデジタル化した事例").await;

	let search_id =
		service.create_session(SearchMode::Case).await.expect("Failed to create session.");
	let sub = service
		.append_step(search_id, StepFilters::default())
		.await
		.expect("Failed to append step.");
	let sub = service
		.attach_resolution(search_id, sub, ResolutionKind::Case, 1)
		.await
		.expect("Failed to attach case.");

	(search_id, sub)
}

async fn registered_user(service: &itnavi_service::ItnaviService, search_id: i32) -> i32 {
	service
		.register_user(RegisterUserRequest {
			user_name: "山田太郎".to_string(),
			company_name: "株式会社サンプル".to_string(),
			email: "taro@example.com".to_string(),
			search_id,
		})
		.await
		.expect("Failed to register user.")
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn disabled_completion_stores_the_sample_document() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping disabled_completion_stores_the_sample_document; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let service = service_with(&test_db, false, "").await;
	let (search_id, sub) = resolved_step(&service).await;
	let user_id = registered_user(&service, search_id).await;
	let document = service
		.create_document(user_id, search_id, sub)
		.await
		.expect("Failed to create document.");
	let content = service
		.get_document(search_id, sub, document.document_id)
		.await
		.expect("Failed to get document.");

	assert_eq!(content, "# 戦略文書(Sample)");

	// The triple must match; a wrong step cannot read the document.
	let result = service.get_document(search_id, sub + 1, document.document_id).await;

	assert!(matches!(result, Err(itnavi_service::Error::NotFound { .. })));

	service.confirm_download(document.document_id).await.expect("Failed to confirm download.");

	let status: String =
		sqlx::query_scalar("SELECT status FROM t_document WHERE document_id = $1")
			.bind(document.document_id)
			.fetch_one(&service.db.pool)
			.await
			.expect("Failed to read status.");

	assert_eq!(status, "downloaded");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn strategy_markers_are_extracted_from_model_output() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping strategy_markers_are_extracted_from_model_output; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let output = "\
余計な前置き
<<START_STRATEGY>>
# 受発注DX戦略
## 1. プロジェクトの概要
<<END_STRATEGY>>";
	let service = service_with(&test_db, true, output).await;
	let (search_id, sub) = resolved_step(&service).await;
	let user_id = registered_user(&service, search_id).await;
	let document = service
		.create_document(user_id, search_id, sub)
		.await
		.expect("Failed to create document.");
	let content = service
		.get_document(search_id, sub, document.document_id)
		.await
		.expect("Failed to get document.");

	assert!(content.starts_with("# 受発注DX戦略"));
	assert!(!content.contains("余計な前置き"));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn unresolved_step_cannot_get_a_document() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping unresolved_step_cannot_get_a_document; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let service = service_with(&test_db, false, "").await;
	let search_id =
		service.create_session(SearchMode::Case).await.expect("Failed to create session.");
	let sub = service
		.append_step(search_id, StepFilters::default())
		.await
		.expect("Failed to append step.");
	let user_id = registered_user(&service, search_id).await;
	let result = service.create_document(user_id, search_id, sub).await;

	assert!(matches!(result, Err(itnavi_service::Error::NotFound { .. })));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn agent_request_is_recorded_without_notification() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping agent_request_is_recorded_without_notification; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let service = service_with(&test_db, false, "").await;
	let search_id =
		service.create_session(SearchMode::Advice).await.expect("Failed to create session.");
	let user_id = registered_user(&service, search_id).await;
	let request_id = service
		.request_agent_support(user_id, search_id)
		.await
		.expect("Failed to request agent support.");

	assert!(request_id >= 1);

	let linked_user: Option<i32> =
		sqlx::query_scalar("SELECT user_id FROM t_search WHERE search_id = $1")
			.bind(search_id)
			.fetch_one(&service.db.pool)
			.await
			.expect("Failed to read session user.");

	assert_eq!(linked_user, Some(user_id));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
