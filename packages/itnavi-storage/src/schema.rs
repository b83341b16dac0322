pub fn render_schema() -> String {
	let init = include_str!("../../../sql/init.sql");

	expand_includes(init)
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_m_industry.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_m_industry.sql")),
				"tables/002_m_company_size.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_m_company_size.sql")),
				"tables/003_m_department.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_m_department.sql")),
				"tables/004_m_theme.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_m_theme.sql")),
				"tables/005_m_job.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_m_job.sql")),
				"tables/006_m_hashtag.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_m_hashtag.sql")),
				"tables/007_m_case.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_m_case.sql")),
				"tables/008_case_industry.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_case_industry.sql")),
				"tables/009_case_company_size.sql" =>
					out.push_str(include_str!("../../../sql/tables/009_case_company_size.sql")),
				"tables/010_case_department.sql" =>
					out.push_str(include_str!("../../../sql/tables/010_case_department.sql")),
				"tables/011_case_theme.sql" =>
					out.push_str(include_str!("../../../sql/tables/011_case_theme.sql")),
				"tables/012_m_talent.sql" =>
					out.push_str(include_str!("../../../sql/tables/012_m_talent.sql")),
				"tables/013_talent_career.sql" =>
					out.push_str(include_str!("../../../sql/tables/013_talent_career.sql")),
				"tables/014_talent_mindset.sql" =>
					out.push_str(include_str!("../../../sql/tables/014_talent_mindset.sql")),
				"tables/015_talent_supportarea.sql" =>
					out.push_str(include_str!("../../../sql/tables/015_talent_supportarea.sql")),
				"tables/016_talent_job.sql" =>
					out.push_str(include_str!("../../../sql/tables/016_talent_job.sql")),
				"tables/017_talent_hashtag.sql" =>
					out.push_str(include_str!("../../../sql/tables/017_talent_hashtag.sql")),
				"tables/018_t_search.sql" =>
					out.push_str(include_str!("../../../sql/tables/018_t_search.sql")),
				"tables/019_d_search.sql" =>
					out.push_str(include_str!("../../../sql/tables/019_d_search.sql")),
				"tables/020_t_document.sql" =>
					out.push_str(include_str!("../../../sql/tables/020_t_document.sql")),
				"tables/021_m_user.sql" =>
					out.push_str(include_str!("../../../sql/tables/021_m_user.sql")),
				"tables/022_t_agent_request.sql" =>
					out.push_str(include_str!("../../../sql/tables/022_t_agent_request.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn expands_every_include() {
		let rendered = render_schema();

		assert!(!rendered.contains("\\ir "));
		assert!(rendered.contains("CREATE TABLE IF NOT EXISTS m_case"));
		assert!(rendered.contains("CREATE TABLE IF NOT EXISTS d_search"));
		assert!(rendered.contains("CREATE TABLE IF NOT EXISTS t_agent_request"));
	}
}
