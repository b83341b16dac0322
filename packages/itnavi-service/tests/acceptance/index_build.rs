use itnavi_service::BuildOutcome;
use itnavi_storage::qdrant::EntityClass;

use super::{build_service, seed_case, seed_talent, stub_providers, test_config, test_db, test_qdrant_url};

const DIM: u32 = 8;

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn disabled_embedding_provider_skips_the_build() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping disabled_embedding_provider_skips_the_build; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let mut cfg = test_config(
		test_db.dsn().to_string(),
		"http://127.0.0.1:6334".to_string(),
		DIM,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);

	cfg.providers.embedding.enabled = false;

	let service =
		build_service(cfg, stub_providers(DIM, "")).await.expect("Failed to build service.");
	let outcome = service
		.build_index(EntityClass::Case, false)
		.await
		.expect("Skipped build must not error.");

	assert_eq!(outcome, BuildOutcome::Skipped);

	// Degraded reads report the index as unavailable rather than erroring
	// at the provider.
	let result = service.query_index(EntityClass::Case, "DX事例", 4).await;

	assert!(matches!(result, Err(itnavi_service::Error::IndexUnavailable { .. })));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn build_then_query_round_trips_projected_documents() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping build_then_query_round_trips_projected_documents; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = test_qdrant_url() else {
		eprintln!(
			"Skipping build_then_query_round_trips_projected_documents; set ITNAVI_QDRANT_URL to run this test."
		);

		return;
	};
	let cfg = test_config(
		test_db.dsn().to_string(),
		qdrant_url,
		DIM,
		test_db.collection_name("talent"),
		test_db.collection_name("case"),
	);
	let service =
		build_service(cfg, stub_providers(DIM, "")).await.expect("Failed to build service.");

	seed_case(&service.db.pool, 1, "受発注DX", "受発注業務をデジタル化した事例").await;
	seed_talent(&service.db.pool, 1, "山田太郎", "製造業DXの専門家").await;

	// Hidden rows never reach the index.
	sqlx::query(
		"\
INSERT INTO m_case (
	case_id, case_name, case_summary, company_summary, initiative_summary,
	issue_background, solution_method, is_visible
)
VALUES (99, '非公開事例', '概要', '企業', '取組', '課題', '解決', FALSE)",
	)
	.execute(&service.db.pool)
	.await
	.expect("Failed to seed hidden case.");

	let case_outcome =
		service.build_index(EntityClass::Case, true).await.expect("Failed to build case index.");
	let talent_outcome = service
		.build_index(EntityClass::Talent, true)
		.await
		.expect("Failed to build talent index.");

	assert_eq!(case_outcome, BuildOutcome::Built { points: 1 });
	assert!(matches!(talent_outcome, BuildOutcome::Built { points } if points >= 1));

	// A non-forced rebuild reuses the persisted collection.
	let reused =
		service.build_index(EntityClass::Case, false).await.expect("Failed to re-open index.");

	assert_eq!(reused, BuildOutcome::Loaded);

	let hits = service
		.query_index(EntityClass::Talent, "製造業のDXに優れた人材", 4)
		.await
		.expect("Failed to query talent index.");

	assert!(!hits.is_empty());
	assert!(hits.len() <= 4);
	assert!(hits[0].text.contains("【名前】"));
	assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));

	let case_hits = service
		.query_index(EntityClass::Case, "受発注", 4)
		.await
		.expect("Failed to query case index.");

	assert!(case_hits.iter().all(|hit| !hit.text.contains("非公開事例")));
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
