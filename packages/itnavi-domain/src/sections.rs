//! Inverse of [`crate::projection`]: recovers structured fields from a
//! retrieved document chunk. Intentionally permissive — retrieved chunks
//! may have been truncated, so missing sections simply produce missing
//! keys and the parser never fails.

use std::{collections::BTreeMap, sync::OnceLock};

use regex::Regex;

use crate::projection;

fn header_re() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();

	RE.get_or_init(|| Regex::new(r"【([^】]*)】").expect("Header pattern must compile."))
}

fn ordinal_re() -> &'static Regex {
	static RE: OnceLock<Regex> = OnceLock::new();

	RE.get_or_init(|| {
		Regex::new(r"^----- Candidate \d+ -----\n").expect("Ordinal pattern must compile.")
	})
}

/// Maps a recognized section label to its canonical field name.
/// Unrecognized labels pass through verbatim.
pub fn canonical_field(label: &str) -> &str {
	match label {
		projection::LABEL_ID => "id",
		projection::LABEL_NAME => "name",
		projection::LABEL_SUMMARY => "summary",
		projection::LABEL_INDUSTRY => "industry",
		projection::LABEL_CAREER => "career",
		projection::LABEL_MINDSET => "mindset",
		projection::LABEL_SUPPORTAREA => "supportarea",
		projection::LABEL_JOB => "job",
		projection::LABEL_HASHTAG => "hashtag",
		projection::LABEL_CASE_NAME => "title",
		projection::LABEL_CASE_SUMMARY => "summary",
		projection::LABEL_COMPANY_SUMMARY => "company_summary",
		projection::LABEL_INITIATIVE => "initiative_summary",
		projection::LABEL_ISSUE => "issue_background",
		projection::LABEL_SOLUTION => "solution_method",
		other => other,
	}
}

/// Parses one retrieved chunk into a field map. A leading candidate
/// ordinal header is stripped first; each `【label】` header captures the
/// content up to the next header or end of text.
pub fn parse_sections(chunk: &str) -> BTreeMap<String, String> {
	let body = ordinal_re().replace(chunk, "");
	let mut fields = BTreeMap::new();
	let headers: Vec<(usize, usize, String)> = header_re()
		.captures_iter(&body)
		.filter_map(|caps| {
			let whole = caps.get(0)?;
			let label = caps.get(1)?.as_str().trim().to_string();

			Some((whole.start(), whole.end(), label))
		})
		.collect();

	for (index, (_, content_start, label)) in headers.iter().enumerate() {
		let content_end = headers.get(index + 1).map(|next| next.0).unwrap_or(body.len());
		let content = body[*content_start..content_end].trim();

		fields.insert(canonical_field(label).to_string(), content.to_string());
	}

	fields
}

/// Splits a bulleted section body back into entries. The empty-section
/// placeholder parses to no entries.
pub fn parse_bullets(body: &str) -> Vec<String> {
	body.lines()
		.filter_map(|line| {
			let trimmed = line.trim();

			if trimmed == projection::EMPTY_SECTION {
				return None;
			}

			trimmed.strip_prefix("- ").map(|entry| entry.trim().to_string())
		})
		.filter(|entry| !entry.is_empty())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_candidate_ordinal_header() {
		let chunk = "----- Candidate 2 -----\n【名前】\n山田\n\n【事例概要】\n概要";
		let fields = parse_sections(chunk);

		assert_eq!(fields.get("name").map(String::as_str), Some("山田"));
		assert_eq!(fields.get("summary").map(String::as_str), Some("概要"));
	}

	#[test]
	fn truncated_chunk_yields_partial_fields() {
		let fields = parse_sections("【名前】\n田中\n\n【経歴】\n- 製造業で");

		assert_eq!(fields.get("name").map(String::as_str), Some("田中"));
		assert_eq!(fields.get("career").map(String::as_str), Some("- 製造業で"));
		assert!(!fields.contains_key("mindset"));
	}

	#[test]
	fn unrecognized_labels_pass_through() {
		let fields = parse_sections("【資格】\n中小企業診断士");

		assert_eq!(fields.get("資格").map(String::as_str), Some("中小企業診断士"));
	}

	#[test]
	fn placeholder_section_parses_to_no_bullets() {
		assert!(parse_bullets("なし").is_empty());
		assert_eq!(parse_bullets("- A\n- B"), vec!["A".to_string(), "B".to_string()]);
	}
}
