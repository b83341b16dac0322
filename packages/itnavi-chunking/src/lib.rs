//! Section-boundary document splitting.
//!
//! Projected documents are sequences of `【label】` sections. A split that
//! lands mid-section would break the label-anchored parser downstream, so
//! chunks are built by packing whole sections up to a length budget and a
//! section is never divided — an oversized section yields an oversized
//! chunk rather than a truncated label. The lead section (the entity's
//! name or id) can be repeated at the head of every follow-up chunk so
//! each chunk identifies its entity on its own.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Debug)]
pub struct ChunkingConfig {
	pub max_chars: u32,
	pub carry_lead_section: bool,
}

#[derive(Clone, Debug)]
pub struct Chunk {
	pub chunk_index: i32,
	pub text: String,
}

/// Length in grapheme clusters, which is what "characters" means for the
/// Japanese profile text this handles.
fn char_len(text: &str) -> usize {
	text.graphemes(true).count()
}

/// Splits `document` into label-section segments. Text before the first
/// header (normally empty) is folded into the first section.
fn split_sections(document: &str) -> Vec<String> {
	let mut sections: Vec<String> = Vec::new();
	let mut current = String::new();

	for line in document.lines() {
		if line.trim_start().starts_with('【') && !current.trim().is_empty() {
			sections.push(current.trim_end().to_string());

			current = String::new();
		}

		current.push_str(line);
		current.push('\n');
	}

	if !current.trim().is_empty() {
		sections.push(current.trim_end().to_string());
	}

	sections
}

pub fn split_document(document: &str, cfg: &ChunkingConfig) -> Vec<Chunk> {
	let sections = split_sections(document);
	let Some(lead) = sections.first().cloned() else {
		return Vec::new();
	};
	let budget = cfg.max_chars as usize;
	let mut chunks: Vec<Chunk> = Vec::new();
	let mut current = String::new();
	let mut chunk_index = 0_i32;

	for section in &sections {
		if char_len(section) > budget {
			tracing::warn!(
				section_chars = char_len(section),
				max_chars = budget,
				"Section exceeds the chunk budget and is kept whole."
			);
		}

		let candidate_len = char_len(&current) + char_len(section) + 2;

		if !current.is_empty() && candidate_len > budget {
			chunks.push(Chunk { chunk_index, text: current.trim_end().to_string() });

			chunk_index += 1;
			current = if cfg.carry_lead_section && section != &lead {
				format!("{lead}\n\n")
			} else {
				String::new()
			};
		}

		current.push_str(section);
		current.push_str("\n\n");
	}

	if !current.trim().is_empty() {
		chunks.push(Chunk { chunk_index, text: current.trim_end().to_string() });
	}

	chunks
}
