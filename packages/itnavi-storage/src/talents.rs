use std::collections::HashMap;

use crate::{
	Result,
	db::Db,
	models::{Talent, TalentBundle},
};

/// Loads every visible talent with its display-ordered children in one
/// batched pass, so rebuilding the index costs a fixed number of queries
/// regardless of talent count.
pub async fn load_visible_bundles(db: &Db) -> Result<Vec<TalentBundle>> {
	let talents = sqlx::query_as::<_, Talent>(
		"\
SELECT talent_id, talent_name, summary, industry_id, display_order, is_visible
FROM m_talent
WHERE is_visible
ORDER BY display_order ASC",
	)
	.fetch_all(&db.pool)
	.await?;

	if talents.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<i32> = talents.iter().map(|t| t.talent_id).collect();
	let industries = industry_names(db, &talents).await?;
	let mut careers = child_texts(
		db,
		"\
SELECT talent_id, career_description AS text
FROM talent_career
WHERE talent_id = ANY($1)
ORDER BY talent_id, display_order ASC",
		&ids,
	)
	.await?;
	let mut mindsets = child_texts(
		db,
		"\
SELECT talent_id, mindset_description AS text
FROM talent_mindset
WHERE talent_id = ANY($1)
ORDER BY talent_id, display_order ASC",
		&ids,
	)
	.await?;
	let mut supportareas = child_texts(
		db,
		"\
SELECT talent_id, supportarea_title || '：' || supportarea_detail AS text
FROM talent_supportarea
WHERE talent_id = ANY($1)
ORDER BY talent_id, display_order ASC",
		&ids,
	)
	.await?;
	let mut jobs = child_texts(
		db,
		"\
SELECT tj.talent_id, j.job_name AS text
FROM talent_job tj
	JOIN m_job j ON j.job_id = tj.job_id
WHERE tj.talent_id = ANY($1)
ORDER BY tj.talent_id, j.display_order ASC",
		&ids,
	)
	.await?;
	let mut hashtags = child_texts(
		db,
		"\
SELECT th.talent_id, h.hashtag_name AS text
FROM talent_hashtag th
	JOIN m_hashtag h ON h.hashtag_id = th.hashtag_id
WHERE th.talent_id = ANY($1)
ORDER BY th.talent_id, h.display_order ASC",
		&ids,
	)
	.await?;

	let bundles = talents
		.into_iter()
		.map(|talent| {
			let id = talent.talent_id;

			TalentBundle {
				industry_name: talent
					.industry_id
					.and_then(|industry_id| industries.get(&industry_id).cloned()),
				careers: careers.remove(&id).unwrap_or_default(),
				mindsets: mindsets.remove(&id).unwrap_or_default(),
				supportareas: supportareas.remove(&id).unwrap_or_default(),
				jobs: jobs.remove(&id).unwrap_or_default(),
				hashtags: hashtags.remove(&id).unwrap_or_default(),
				talent,
			}
		})
		.collect();

	Ok(bundles)
}

async fn industry_names(db: &Db, talents: &[Talent]) -> Result<HashMap<i32, String>> {
	let industry_ids: Vec<i32> = talents.iter().filter_map(|t| t.industry_id).collect();

	if industry_ids.is_empty() {
		return Ok(HashMap::new());
	}

	let rows: Vec<(i32, String)> = sqlx::query_as(
		"\
SELECT industry_id, industry_name
FROM m_industry
WHERE industry_id = ANY($1)",
	)
	.bind(&industry_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows.into_iter().collect())
}

async fn child_texts(db: &Db, sql: &str, talent_ids: &[i32]) -> Result<HashMap<i32, Vec<String>>> {
	let rows: Vec<(i32, String)> =
		sqlx::query_as(sql).bind(talent_ids).fetch_all(&db.pool).await?;
	let mut grouped: HashMap<i32, Vec<String>> = HashMap::new();

	for (talent_id, text) in rows {
		grouped.entry(talent_id).or_default().push(text);
	}

	Ok(grouped)
}
