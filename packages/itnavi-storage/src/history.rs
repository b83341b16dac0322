use crate::{
	Result,
	db::Db,
	models::{SearchSession, SearchStep, StepFilters},
};

/// A step resolves to exactly one of these; attaching to an occupied slot
/// forks the step instead of overwriting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSlot {
	Case,
	Job,
	Talent,
}
impl ResolutionSlot {
	pub fn column(&self) -> &'static str {
		match self {
			Self::Case => "case_id",
			Self::Job => "job_id",
			Self::Talent => "talent_id",
		}
	}
}

pub async fn insert_search(db: &Db, search_mode: i32) -> Result<i32> {
	let search_id: i32 = sqlx::query_scalar(
		"\
INSERT INTO t_search (user_id, search_mode)
VALUES (NULL, $1)
RETURNING search_id",
	)
	.bind(search_mode)
	.fetch_one(&db.pool)
	.await?;

	Ok(search_id)
}

pub async fn get_search(db: &Db, search_id: i32) -> Result<SearchSession> {
	sqlx::query_as::<_, SearchSession>(
		"\
SELECT search_id, user_id, search_mode, searched_at
FROM t_search
WHERE search_id = $1",
	)
	.bind(search_id)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("t_search {search_id}")))
}

/// Appends a step with the next `search_id_sub` for the session. The parent
/// row is locked for the duration of the transaction so concurrent appends
/// cannot mint the same sub id.
pub async fn insert_step(db: &Db, search_id: i32, filters: &StepFilters) -> Result<i32> {
	let mut tx = db.pool.begin().await?;

	lock_session(&mut tx, search_id).await?;

	let sub: i32 = sqlx::query_scalar(
		"\
SELECT COALESCE(MAX(search_id_sub), 0) + 1
FROM d_search
WHERE search_id = $1",
	)
	.bind(search_id)
	.fetch_one(&mut *tx)
	.await?;

	sqlx::query(
		"\
INSERT INTO d_search (
	search_id,
	search_id_sub,
	industry_id,
	company_size_id,
	department_id,
	theme_id,
	case_id,
	job_id,
	talent_id
)
VALUES ($1, $2, $3, $4, $5, $6, NULL, NULL, NULL)",
	)
	.bind(search_id)
	.bind(sub)
	.bind(filters.industry_id)
	.bind(filters.company_size_id)
	.bind(filters.department_id)
	.bind(filters.theme_id)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(sub)
}

pub async fn get_step(db: &Db, search_id: i32, search_id_sub: i32) -> Result<SearchStep> {
	sqlx::query_as::<_, SearchStep>(
		"\
SELECT
	search_id,
	search_id_sub,
	industry_id,
	company_size_id,
	department_id,
	theme_id,
	case_id,
	job_id,
	talent_id,
	searched_at
FROM d_search
WHERE search_id = $1
	AND search_id_sub = $2",
	)
	.bind(search_id)
	.bind(search_id_sub)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("d_search ({search_id}, {search_id_sub})")))
}

/// Fills the step's resolution slot. An empty slot is updated in place and
/// the same sub id comes back; an occupied slot forks a new step that
/// copies the filters and the other slots, and the new sub id comes back.
pub async fn attach_resolution(
	db: &Db,
	search_id: i32,
	search_id_sub: i32,
	slot: ResolutionSlot,
	id: i32,
) -> Result<i32> {
	let mut tx = db.pool.begin().await?;

	lock_session(&mut tx, search_id).await?;

	let step = sqlx::query_as::<_, SearchStep>(
		"\
SELECT
	search_id,
	search_id_sub,
	industry_id,
	company_size_id,
	department_id,
	theme_id,
	case_id,
	job_id,
	talent_id,
	searched_at
FROM d_search
WHERE search_id = $1
	AND search_id_sub = $2",
	)
	.bind(search_id)
	.bind(search_id_sub)
	.fetch_optional(&mut *tx)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("d_search ({search_id}, {search_id_sub})")))?;
	let occupied = match slot {
		ResolutionSlot::Case => step.case_id.is_some(),
		ResolutionSlot::Job => step.job_id.is_some(),
		ResolutionSlot::Talent => step.talent_id.is_some(),
	};
	let result_sub = if occupied {
		let sub: i32 = sqlx::query_scalar(
			"\
SELECT COALESCE(MAX(search_id_sub), 0) + 1
FROM d_search
WHERE search_id = $1",
		)
		.bind(search_id)
		.fetch_one(&mut *tx)
		.await?;
		let (case_id, job_id, talent_id) = forked_slots(&step, slot, id);

		sqlx::query(
			"\
INSERT INTO d_search (
	search_id,
	search_id_sub,
	industry_id,
	company_size_id,
	department_id,
	theme_id,
	case_id,
	job_id,
	talent_id
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
		)
		.bind(search_id)
		.bind(sub)
		.bind(step.industry_id)
		.bind(step.company_size_id)
		.bind(step.department_id)
		.bind(step.theme_id)
		.bind(case_id)
		.bind(job_id)
		.bind(talent_id)
		.execute(&mut *tx)
		.await?;

		sub
	} else {
		let sql = format!(
			"\
UPDATE d_search
SET {column} = $1
WHERE search_id = $2
	AND search_id_sub = $3",
			column = slot.column(),
		);

		sqlx::query(&sql)
			.bind(id)
			.bind(search_id)
			.bind(search_id_sub)
			.execute(&mut *tx)
			.await?;

		search_id_sub
	};

	tx.commit().await?;

	Ok(result_sub)
}

pub async fn set_search_user(db: &Db, search_id: i32, user_id: i32) -> Result<()> {
	let affected = sqlx::query(
		"\
UPDATE t_search
SET user_id = $1
WHERE search_id = $2",
	)
	.bind(user_id)
	.bind(search_id)
	.execute(&db.pool)
	.await?
	.rows_affected();

	if affected == 0 {
		return Err(crate::Error::NotFound(format!("t_search {search_id}")));
	}

	Ok(())
}

async fn lock_session(
	tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
	search_id: i32,
) -> Result<()> {
	sqlx::query_scalar::<_, i32>(
		"\
SELECT search_id
FROM t_search
WHERE search_id = $1
FOR UPDATE",
	)
	.bind(search_id)
	.fetch_optional(&mut **tx)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("t_search {search_id}")))?;

	Ok(())
}

fn forked_slots(
	step: &SearchStep,
	slot: ResolutionSlot,
	id: i32,
) -> (Option<i32>, Option<i32>, Option<i32>) {
	match slot {
		ResolutionSlot::Case => (Some(id), step.job_id, step.talent_id),
		ResolutionSlot::Job => (step.case_id, Some(id), step.talent_id),
		ResolutionSlot::Talent => (step.case_id, step.job_id, Some(id)),
	}
}
