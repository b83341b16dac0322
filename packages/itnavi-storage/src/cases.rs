use crate::{
	Result,
	db::Db,
	models::{Case, CaseSummary, SearchStep},
};

/// Visible cases narrowed by the step's non-null taxonomy filters. Each
/// present filter joins its link table; absent filters add nothing.
pub async fn filtered_list(db: &Db, step: &SearchStep) -> Result<Vec<CaseSummary>> {
	let mut sql = String::from(
		"\
SELECT c.case_id, c.case_name, c.case_summary
FROM m_case c",
	);
	let mut binds = Vec::new();

	if let Some(industry_id) = step.industry_id {
		binds.push(industry_id);
		sql.push_str(&format!(
			"\n	JOIN case_industry ci ON ci.case_id = c.case_id AND ci.industry_id = ${}",
			binds.len()
		));
	}

	if let Some(company_size_id) = step.company_size_id {
		binds.push(company_size_id);
		sql.push_str(&format!(
			"\n	JOIN case_company_size cs ON cs.case_id = c.case_id AND cs.company_size_id = ${}",
			binds.len()
		));
	}

	if let Some(department_id) = step.department_id {
		binds.push(department_id);
		sql.push_str(&format!(
			"\n	JOIN case_department cd ON cd.case_id = c.case_id AND cd.department_id = ${}",
			binds.len()
		));
	}

	if let Some(theme_id) = step.theme_id {
		binds.push(theme_id);
		sql.push_str(&format!(
			"\n	JOIN case_theme ct ON ct.case_id = c.case_id AND ct.theme_id = ${}",
			binds.len()
		));
	}

	sql.push_str("\nWHERE c.is_visible\nORDER BY c.display_order ASC");

	let mut query = sqlx::query_as::<_, CaseSummary>(&sql);

	for bind in binds {
		query = query.bind(bind);
	}

	Ok(query.fetch_all(&db.pool).await?)
}

pub async fn featured(db: &Db, limit: i64) -> Result<Vec<CaseSummary>> {
	let cases = sqlx::query_as::<_, CaseSummary>(
		"\
SELECT case_id, case_name, case_summary
FROM m_case
WHERE is_visible
ORDER BY display_order ASC
LIMIT $1",
	)
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	Ok(cases)
}

/// Full visible records, for index builds.
pub async fn list_visible_full(db: &Db) -> Result<Vec<Case>> {
	let cases = sqlx::query_as::<_, Case>(
		"\
SELECT
	case_id,
	case_name,
	case_summary,
	company_summary,
	initiative_summary,
	issue_background,
	solution_method,
	display_order,
	is_visible
FROM m_case
WHERE is_visible
ORDER BY display_order ASC",
	)
	.fetch_all(&db.pool)
	.await?;

	Ok(cases)
}

pub async fn get(db: &Db, case_id: i32) -> Result<Case> {
	sqlx::query_as::<_, Case>(
		"\
SELECT
	case_id,
	case_name,
	case_summary,
	company_summary,
	initiative_summary,
	issue_background,
	solution_method,
	display_order,
	is_visible
FROM m_case
WHERE case_id = $1",
	)
	.bind(case_id)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("m_case {case_id}")))
}
