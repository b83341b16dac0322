use itnavi_service::AdviceRequest;
use itnavi_storage::qdrant::EntityClass;

use super::{build_service, seed_case, stub_providers, test_config, test_db, test_qdrant_url};

const DIM: u32 = 8;

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn disabled_completion_degrades_to_placeholders() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping disabled_completion_degrades_to_placeholders; set ITNAVI_PG_DSN to run this test."
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

	cfg.providers.completion.enabled = false;
	// No index exists either; the flow must still answer.
	cfg.providers.embedding.enabled = false;

	let service =
		build_service(cfg, stub_providers(DIM, "")).await.expect("Failed to build service.");
	let response =
		service.advise(AdviceRequest::default()).await.expect("Degraded advise must not error.");

	assert_eq!(response.advice, "アドバイス(Sample)");
	assert_eq!(response.retrieval_query, "いい感じの事例を抽出してください");
	assert!(response.cases.is_empty());
	assert_eq!(response.search_id_sub, 1);
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn advice_extracts_markers_and_retrieves_cases() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping advice_extracts_markers_and_retrieves_cases; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = test_qdrant_url() else {
		eprintln!(
			"Skipping advice_extracts_markers_and_retrieves_cases; set ITNAVI_QDRANT_URL to run this test."
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
	let output = "\
前置きです。
<<START_ADVICE>>
まずは受発注業務の現状を棚卸ししましょう。
<<END_ADVICE>>
<<START_PROMPT>>
受発注業務のデジタル化事例
<<END_PROMPT>>";
	let service =
		build_service(cfg, stub_providers(DIM, output)).await.expect("Failed to build service.");

	seed_case(&service.db.pool, 1, "受発注DX", "受発注業務をデジタル化した事例").await;
	seed_case(&service.db.pool, 2, "在庫可視化", "在庫情報をリアルタイム化した事例").await;
	service.build_index(EntityClass::Case, true).await.expect("Failed to build case index.");

	let request = AdviceRequest {
		timing: Some("導入検討".to_string()),
		domain: Some("業務効率化".to_string()),
		free_word: None,
	};
	let response = service.advise(request).await.expect("Failed to advise.");

	assert_eq!(response.advice, "まずは受発注業務の現状を棚卸ししましょう。");
	assert_eq!(response.retrieval_query, "受発注業務のデジタル化事例");
	assert!(!response.cases.is_empty());
	assert!(response.cases.len() <= 4);

	// Retrieved documents parse back into structured case fields.
	let first = &response.cases[0];

	assert!(!first.id.is_empty());
	assert!(!first.title.is_empty());
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn markerless_output_falls_back_to_placeholders() {
	let Some(test_db) = test_db().await else {
		eprintln!(
			"Skipping markerless_output_falls_back_to_placeholders; set ITNAVI_PG_DSN to run this test."
		);

		return;
	};
	let Some(qdrant_url) = test_qdrant_url() else {
		eprintln!(
			"Skipping markerless_output_falls_back_to_placeholders; set ITNAVI_QDRANT_URL to run this test."
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
	let service = build_service(cfg, stub_providers(DIM, "マーカーのない出力"))
		.await
		.expect("Failed to build service.");

	seed_case(&service.db.pool, 1, "受発注DX", "受発注業務をデジタル化した事例").await;
	service.build_index(EntityClass::Case, true).await.expect("Failed to build case index.");

	let response =
		service.advise(AdviceRequest::default()).await.expect("Fallback advise must not error.");

	assert_eq!(response.advice, "アドバイス(Sample)");
	assert_eq!(response.retrieval_query, "いい感じの事例を抽出してください");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
