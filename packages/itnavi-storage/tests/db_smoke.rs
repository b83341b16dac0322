use itnavi_config::Postgres;
use itnavi_storage::db::Db;
use itnavi_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set ITNAVI_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = itnavi_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set ITNAVI_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	for table in ["m_case", "m_talent", "t_search", "d_search", "t_document", "t_agent_request"] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}

	// Idempotent re-application.
	db.ensure_schema().await.expect("Failed to re-apply schema.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
