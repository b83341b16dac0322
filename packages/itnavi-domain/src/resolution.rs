//! The entity kinds a search step can resolve to.
//!
//! A step's filter fields are immutable once written. Attaching a case,
//! job, or talent either fills the step's still-empty slot in place or
//! forks a new step that copies every other field, so prior selections
//! are never overwritten and the per-session history stays auditable.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
	Case,
	Job,
	Talent,
}
impl ResolutionKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Case => "case",
			Self::Job => "job",
			Self::Talent => "talent",
		}
	}
}
