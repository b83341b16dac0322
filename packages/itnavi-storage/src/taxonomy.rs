use crate::{Result, db::Db, models::TaxonomyEntry};

/// The taxonomy masters share one layout (id, name, display_order,
/// is_visible), so one query serves them all. The identifiers come from
/// this enum, never from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
	Industry,
	CompanySize,
	Department,
	Theme,
	Job,
}
impl Taxonomy {
	pub fn table(&self) -> &'static str {
		match self {
			Self::Industry => "m_industry",
			Self::CompanySize => "m_company_size",
			Self::Department => "m_department",
			Self::Theme => "m_theme",
			Self::Job => "m_job",
		}
	}

	pub fn id_column(&self) -> &'static str {
		match self {
			Self::Industry => "industry_id",
			Self::CompanySize => "company_size_id",
			Self::Department => "department_id",
			Self::Theme => "theme_id",
			Self::Job => "job_id",
		}
	}

	pub fn name_column(&self) -> &'static str {
		match self {
			Self::Industry => "industry_name",
			Self::CompanySize => "company_size_name",
			Self::Department => "department_name",
			Self::Theme => "theme_name",
			Self::Job => "job_name",
		}
	}
}

pub async fn list_visible(db: &Db, taxonomy: Taxonomy) -> Result<Vec<TaxonomyEntry>> {
	let sql = format!(
		"\
SELECT {id} AS id, {name} AS name
FROM {table}
WHERE is_visible
ORDER BY display_order ASC",
		id = taxonomy.id_column(),
		name = taxonomy.name_column(),
		table = taxonomy.table(),
	);
	let entries =
		sqlx::query_as::<_, TaxonomyEntry>(&sql).fetch_all(&db.pool).await?;

	Ok(entries)
}

pub async fn get_entry(db: &Db, taxonomy: Taxonomy, id: i32) -> Result<TaxonomyEntry> {
	let sql = format!(
		"\
SELECT {id} AS id, {name} AS name
FROM {table}
WHERE {id} = $1",
		id = taxonomy.id_column(),
		name = taxonomy.name_column(),
		table = taxonomy.table(),
	);

	sqlx::query_as::<_, TaxonomyEntry>(&sql)
		.bind(id)
		.fetch_optional(&db.pool)
		.await?
		.ok_or_else(|| crate::Error::NotFound(format!("{} {id}", taxonomy.table())))
}
