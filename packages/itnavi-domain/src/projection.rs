//! Flattens an entity plus its eagerly loaded children into one labeled
//! text document. The `【label】` headers are a contract shared with
//! [`crate::sections`]: the parser anchors on them to recover structured
//! fields from retrieved chunks, so every category emits its header even
//! when it has no rows.

/// Placeholder emitted for a child category with zero rows. Keeps the
/// parser's anchors well-formed on sparse profiles.
pub const EMPTY_SECTION: &str = "なし";

pub const LABEL_ID: &str = "ID";
pub const LABEL_NAME: &str = "名前";
pub const LABEL_SUMMARY: &str = "エグゼクティブサマリー";
pub const LABEL_INDUSTRY: &str = "業界情報";
pub const LABEL_CAREER: &str = "経歴";
pub const LABEL_MINDSET: &str = "マインドセット";
pub const LABEL_SUPPORTAREA: &str = "支援領域";
pub const LABEL_JOB: &str = "保有職種";
pub const LABEL_HASHTAG: &str = "ハッシュタグ";
pub const LABEL_CASE_NAME: &str = "事例名";
pub const LABEL_CASE_SUMMARY: &str = "事例概要";
pub const LABEL_COMPANY_SUMMARY: &str = "企業概要";
pub const LABEL_INITIATIVE: &str = "取り組み概要";
pub const LABEL_ISSUE: &str = "課題背景";
pub const LABEL_SOLUTION: &str = "解決手法";

/// A talent master row joined with its child attributes, already sorted by
/// display order.
#[derive(Clone, Debug)]
pub struct TalentProfile {
	pub talent_id: i32,
	pub name: String,
	pub summary: String,
	pub industry: String,
	pub careers: Vec<String>,
	pub mindsets: Vec<String>,
	pub supportareas: Vec<String>,
	pub jobs: Vec<String>,
	pub hashtags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct CaseRecord {
	pub case_id: i32,
	pub case_name: String,
	pub case_summary: String,
	pub company_summary: String,
	pub initiative_summary: String,
	pub issue_background: String,
	pub solution_method: String,
}

pub fn project_talent(talent: &TalentProfile) -> String {
	let mut doc = String::new();

	push_section(&mut doc, LABEL_NAME, &talent.name);
	push_section(&mut doc, LABEL_SUMMARY, &talent.summary);
	push_section(&mut doc, LABEL_INDUSTRY, &talent.industry);
	push_list_section(&mut doc, LABEL_CAREER, &talent.careers);
	push_list_section(&mut doc, LABEL_MINDSET, &talent.mindsets);
	push_list_section(&mut doc, LABEL_SUPPORTAREA, &talent.supportareas);
	push_list_section(&mut doc, LABEL_JOB, &talent.jobs);
	push_list_section(&mut doc, LABEL_HASHTAG, &talent.hashtags);

	doc.trim_end().to_string()
}

pub fn project_case(case: &CaseRecord) -> String {
	let mut doc = String::new();

	push_section(&mut doc, LABEL_ID, &case.case_id.to_string());
	push_section(&mut doc, LABEL_CASE_NAME, &case.case_name);
	push_section(&mut doc, LABEL_CASE_SUMMARY, &case.case_summary);
	push_section(&mut doc, LABEL_COMPANY_SUMMARY, &case.company_summary);
	push_section(&mut doc, LABEL_INITIATIVE, &case.initiative_summary);
	push_section(&mut doc, LABEL_ISSUE, &case.issue_background);
	push_section(&mut doc, LABEL_SOLUTION, &case.solution_method);

	doc.trim_end().to_string()
}

fn push_section(doc: &mut String, label: &str, body: &str) {
	doc.push_str(&format!("【{label}】\n"));

	let trimmed = body.trim();

	if trimmed.is_empty() {
		doc.push_str(EMPTY_SECTION);
	} else {
		doc.push_str(trimmed);
	}

	doc.push_str("\n\n");
}

fn push_list_section(doc: &mut String, label: &str, entries: &[String]) {
	doc.push_str(&format!("【{label}】\n"));

	let mut wrote = false;

	for entry in entries {
		let trimmed = entry.trim();

		if trimmed.is_empty() {
			continue;
		}

		doc.push_str(&format!("- {trimmed}\n"));

		wrote = true;
	}

	if !wrote {
		doc.push_str(EMPTY_SECTION);
		doc.push('\n');
	}

	doc.push('\n');
}
