use itnavi_domain::resolution::ResolutionKind;
use itnavi_service::SearchMode;
use itnavi_storage::models::StepFilters;

use super::{build_service, stub_providers, test_config, test_db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn selecting_twice_forks_and_preserves_history() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping selecting_twice_forks_and_preserves_history; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let cfg = test_config(
		test_db.dsn().to_string(),
		"http://127.0.0.1:6334".to_string(),
		8,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);
	let service =
		build_service(cfg, stub_providers(8, "")).await.expect("Failed to build service.");

	super::seed_case(&service.db.pool, 1, "受発注DX", "受発注業務をデジタル化した事例").await;
	super::seed_case(&service.db.pool, 2, "在庫可視化", "在庫情報をリアルタイム化した事例").await;

	let search_id =
		service.create_session(SearchMode::Case).await.expect("Failed to create session.");
	let sub = service
		.append_step(search_id, StepFilters::default())
		.await
		.expect("Failed to append step.");

	assert_eq!(sub, 1);

	// First selection fills the empty slot in place.
	let same = service
		.attach_resolution(search_id, sub, ResolutionKind::Case, 1)
		.await
		.expect("Failed to attach first case.");

	assert_eq!(same, 1);

	// Re-selecting from the same step forks; the original step is untouched.
	let forked = service
		.attach_resolution(search_id, sub, ResolutionKind::Case, 2)
		.await
		.expect("Failed to attach second case.");

	assert_eq!(forked, 2);

	let original = service.get_step(search_id, 1).await.expect("Failed to get step 1.");
	let fork = service.get_step(search_id, 2).await.expect("Failed to get step 2.");

	assert_eq!(original.case_id, Some(1));
	assert_eq!(fork.case_id, Some(2));

	// A talent attaches to the forked step without disturbing its case.
	super::seed_talent(&service.db.pool, 9, "山田太郎", "製造業DXの専門家").await;

	let talent_sub = service
		.attach_resolution(search_id, forked, ResolutionKind::Talent, 9)
		.await
		.expect("Failed to attach talent.");

	assert_eq!(talent_sub, forked);

	let resolved = service.get_step(search_id, forked).await.expect("Failed to re-get step 2.");

	assert_eq!(resolved.case_id, Some(2));
	assert_eq!(resolved.talent_id, Some(9));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn attach_to_missing_step_is_not_found() {
	let Some(test_db) = test_db().await else {
		eprintln!("Skipping attach_to_missing_step_is_not_found; set ITNAVI_PG_DSN to run this test.");

		return;
	};
	let cfg = test_config(
		test_db.dsn().to_string(),
		"http://127.0.0.1:6334".to_string(),
		8,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);
	let service =
		build_service(cfg, stub_providers(8, "")).await.expect("Failed to build service.");
	let search_id =
		service.create_session(SearchMode::Case).await.expect("Failed to create session.");
	let result = service.attach_resolution(search_id, 5, ResolutionKind::Case, 1).await;

	assert!(matches!(result, Err(itnavi_service::Error::NotFound { .. })));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn unresolved_step_cannot_drive_a_talent_search() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping unresolved_step_cannot_drive_a_talent_search; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let cfg = test_config(
		test_db.dsn().to_string(),
		"http://127.0.0.1:6334".to_string(),
		8,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);
	let service =
		build_service(cfg, stub_providers(8, "")).await.expect("Failed to build service.");
	let search_id =
		service.create_session(SearchMode::Case).await.expect("Failed to create session.");
	let sub = service
		.append_step(search_id, StepFilters::default())
		.await
		.expect("Failed to append step.");

	// The step exists but no case or job was ever selected on it.
	let result = service.recommend_talents(search_id, sub).await;

	assert!(matches!(result, Err(itnavi_service::Error::NotFound { .. })));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
