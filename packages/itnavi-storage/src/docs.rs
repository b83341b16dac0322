use crate::{Result, db::Db, models::StrategyDocument};

pub const STATUS_CREATED: &str = "created";
pub const STATUS_DOWNLOADED: &str = "downloaded";

pub async fn insert_document(
	db: &Db,
	search_id: i32,
	search_id_sub: i32,
	content: &str,
) -> Result<i32> {
	let document_id: i32 = sqlx::query_scalar(
		"\
INSERT INTO t_document (search_id, search_id_sub, content, status)
VALUES ($1, $2, $3, $4)
RETURNING document_id",
	)
	.bind(search_id)
	.bind(search_id_sub)
	.bind(content)
	.bind(STATUS_CREATED)
	.fetch_one(&db.pool)
	.await?;

	Ok(document_id)
}

/// Fetches a document only when it belongs to the given step, so a leaked
/// document id cannot read another session's output.
pub async fn get_document_for_step(
	db: &Db,
	search_id: i32,
	search_id_sub: i32,
	document_id: i32,
) -> Result<StrategyDocument> {
	sqlx::query_as::<_, StrategyDocument>(
		"\
SELECT document_id, search_id, search_id_sub, content, status, created_at, downloaded_at
FROM t_document
WHERE document_id = $1
	AND search_id = $2
	AND search_id_sub = $3",
	)
	.bind(document_id)
	.bind(search_id)
	.bind(search_id_sub)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| {
		crate::Error::NotFound(format!("t_document {document_id} for ({search_id}, {search_id_sub})"))
	})
}

pub async fn mark_downloaded(db: &Db, document_id: i32) -> Result<()> {
	let affected = sqlx::query(
		"\
UPDATE t_document
SET
	status = $1,
	downloaded_at = now()
WHERE document_id = $2",
	)
	.bind(STATUS_DOWNLOADED)
	.bind(document_id)
	.execute(&db.pool)
	.await?
	.rows_affected();

	if affected == 0 {
		return Err(crate::Error::NotFound(format!("t_document {document_id}")));
	}

	Ok(())
}
