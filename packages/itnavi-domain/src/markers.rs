//! Marker-delimited extraction from generative-model output. Extraction
//! is fallible by design; every call site supplies its own fallback.

pub const ADVICE_START: &str = "<<START_ADVICE>>";
pub const ADVICE_END: &str = "<<END_ADVICE>>";
pub const PROMPT_START: &str = "<<START_PROMPT>>";
pub const PROMPT_END: &str = "<<END_PROMPT>>";
pub const STRATEGY_START: &str = "<<START_STRATEGY>>";
pub const STRATEGY_END: &str = "<<END_STRATEGY>>";

/// Returns the trimmed text between `start` and `end`, or `None` when
/// either marker is absent or they are out of order.
pub fn extract_between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
	let start_index = text.find(start)? + start.len();
	let end_index = text[start_index..].find(end)? + start_index;

	Some(text[start_index..end_index].trim())
}
