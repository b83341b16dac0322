use std::env;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Map;
use tower::util::ServiceExt;

use itnavi_api::{routes, state::AppState};
use itnavi_testkit::TestDatabase;

fn test_config(
	dsn: String,
	qdrant_url: String,
	talent_collection: String,
	case_collection: String,
) -> itnavi_config::Config {
	itnavi_config::Config {
		service: itnavi_config::Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: itnavi_config::Storage {
			postgres: itnavi_config::Postgres { dsn, pool_max_conns: 2 },
			qdrant: itnavi_config::Qdrant {
				url: qdrant_url,
				talent_collection,
				case_collection,
				vector_dim: 16,
			},
		},
		providers: itnavi_config::Providers {
			embedding: itnavi_config::EmbeddingProviderConfig {
				enabled: false,
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/embeddings".to_string(),
				model: "test".to_string(),
				dimensions: 16,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
			completion: itnavi_config::CompletionProviderConfig {
				enabled: false,
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test".to_string(),
				temperature: 0.2,
				timeout_ms: 1_000,
				default_headers: Map::new(),
				placeholder_advice: "アドバイス(Sample)".to_string(),
				placeholder_retrieval_query: "いい感じの事例を抽出してください".to_string(),
				sample_document: "# 戦略文書(Sample)".to_string(),
			},
			notify: itnavi_config::NotifyConfig {
				enabled: false,
				url: String::new(),
				timeout_ms: 1_000,
				subject: "[test] subject".to_string(),
			},
		},
		retrieval: itnavi_config::Retrieval { top_k: 4, featured_count: 3 },
		chunking: itnavi_config::Chunking { enabled: true, max_chars: 500, carry_lead_section: true },
	}
}

async fn test_env() -> Option<(TestDatabase, String)> {
	let base_dsn = match itnavi_testkit::env_dsn() {
		Some(value) => value,
		None => {
			eprintln!("Skipping HTTP tests; set ITNAVI_PG_DSN to run this test.");

			return None;
		},
	};
	let qdrant_url = match env::var("ITNAVI_QDRANT_URL") {
		Ok(value) => value,
		Err(_) => {
			eprintln!("Skipping HTTP tests; set ITNAVI_QDRANT_URL to run this test.");

			return None;
		},
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");

	Some((test_db, qdrant_url))
}

async fn test_state(test_db: &TestDatabase, qdrant_url: String) -> AppState {
	let config = test_config(
		test_db.dsn().to_string(),
		qdrant_url,
		test_db.collection_name("itnavi_http_talent"),
		test_db.collection_name("itnavi_http_case"),
	);

	AppState::new(config).await.expect("Failed to initialize app state.")
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	serde_json::from_slice(&bytes).expect("Failed to parse response.")
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
	Request::builder()
		.method(method)
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn health_ok() {
	let Some((test_db, qdrant_url)) = test_env().await else {
		return;
	};
	let state = test_state(&test_db, qdrant_url).await;
	let app = routes::router(state.clone());
	let _ = routes::admin_router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/health")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn empty_taxonomy_is_not_found() {
	let Some((test_db, qdrant_url)) = test_env().await else {
		return;
	};
	let state = test_state(&test_db, qdrant_url).await;
	let app = routes::router(state);
	let response = app
		.oneshot(
			Request::builder()
				.uri("/v1/taxonomies/industries")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call taxonomy endpoint.");

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = read_json(response).await;

	assert_eq!(json["error_code"], "not_found");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn case_search_select_and_detail() {
	let Some((test_db, qdrant_url)) = test_env().await else {
		return;
	};
	let state = test_state(&test_db, qdrant_url).await;
	let pool = &state.service.db.pool;

	sqlx::query(
		"INSERT INTO m_industry (industry_id, industry_name, display_order) VALUES (1, '製造', 1)",
	)
	.execute(pool)
	.await
	.expect("Failed to seed industry.");
	sqlx::query(
		"INSERT INTO m_case (case_id, case_name, case_summary, company_summary, \
		 initiative_summary, issue_background, solution_method, display_order) \
		 VALUES (1, 'DX推進事例', '概要', '企業概要', '取組概要', '課題背景', '解決方法', 1)",
	)
	.execute(pool)
	.await
	.expect("Failed to seed case.");
	sqlx::query("INSERT INTO case_industry (case_id, industry_id) VALUES (1, 1)")
		.execute(pool)
		.await
		.expect("Failed to seed case_industry.");

	let app = routes::router(state);
	let response = app
		.clone()
		.oneshot(json_request("POST", "/v1/case-search", serde_json::json!({ "industry_id": 1 })))
		.await
		.expect("Failed to start a case search.");

	assert_eq!(response.status(), StatusCode::OK);

	let step = read_json(response).await;
	let search_id = step["search_id"].as_i64().expect("Missing search_id.");

	assert_eq!(step["search_id_sub"], 1);

	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri(format!("/v1/case-search/{search_id}/1/cases"))
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to list cases.");

	assert_eq!(response.status(), StatusCode::OK);

	let cases = read_json(response).await;

	assert_eq!(cases[0]["case_name"], "DX推進事例");

	let response = app
		.clone()
		.oneshot(json_request(
			"POST",
			"/v1/case-search/select",
			serde_json::json!({ "search_id": search_id, "search_id_sub": 1, "case_id": 1 }),
		))
		.await
		.expect("Failed to select a case.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(read_json(response).await["search_id_sub"], 1);

	let response = app
		.clone()
		.oneshot(
			Request::builder()
				.uri(format!("/v1/case-search/{search_id}/1/detail"))
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to fetch case detail.");

	assert_eq!(response.status(), StatusCode::OK);

	let detail = read_json(response).await;

	assert_eq!(detail["case_name"], "DX推進事例");
	assert_eq!(detail["solution_method"], "解決方法");

	// A second selection on the occupied step forks a new one.
	let response = app
		.clone()
		.oneshot(json_request(
			"POST",
			"/v1/case-search/select",
			serde_json::json!({ "search_id": search_id, "search_id_sub": 1, "case_id": 1 }),
		))
		.await
		.expect("Failed to reselect a case.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(read_json(response).await["search_id_sub"], 2);

	// Passing the session id appends a refined step instead of opening a new
	// session.
	let response = app
		.oneshot(json_request(
			"POST",
			"/v1/case-search",
			serde_json::json!({ "search_id": search_id, "industry_id": 1, "theme_id": 1 }),
		))
		.await
		.expect("Failed to refine the case search.");

	assert_eq!(response.status(), StatusCode::OK);

	let step = read_json(response).await;

	assert_eq!(step["search_id"], search_id);
	assert_eq!(step["search_id_sub"], 3);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres and Qdrant. Set ITNAVI_PG_DSN and ITNAVI_QDRANT_URL to run."]
async fn malformed_email_is_rejected() {
	let Some((test_db, qdrant_url)) = test_env().await else {
		return;
	};
	let state = test_state(&test_db, qdrant_url).await;
	let app = routes::router(state);
	let payload = serde_json::json!({
		"user_name": "山田太郎",
		"company_name": "株式会社テスト",
		"email": "not-an-email",
		"search_id": 1
	});
	let response = app
		.oneshot(json_request("POST", "/v1/users", payload))
		.await
		.expect("Failed to call user registration.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = read_json(response).await;

	assert_eq!(json["error_code"], "invalid_request");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
