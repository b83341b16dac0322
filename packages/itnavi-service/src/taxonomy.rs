use serde::Serialize;

use crate::{Error, ItnaviService, Result};
use itnavi_storage::taxonomy::{self, Taxonomy};

#[derive(Clone, Debug, Serialize)]
pub struct TaxonomyItem {
	pub id: i32,
	pub name: String,
}

/// The four case-search taxonomies in one payload, for the issue-selection
/// screen.
#[derive(Clone, Debug, Serialize)]
pub struct IssueOptions {
	pub industries: Vec<TaxonomyItem>,
	pub company_sizes: Vec<TaxonomyItem>,
	pub departments: Vec<TaxonomyItem>,
	pub themes: Vec<TaxonomyItem>,
}

impl ItnaviService {
	pub async fn list_taxonomy(&self, taxonomy: Taxonomy) -> Result<Vec<TaxonomyItem>> {
		let entries = taxonomy::list_visible(&self.db, taxonomy).await?;

		if entries.is_empty() {
			return Err(Error::NotFound {
				message: format!("No visible rows in {}.", taxonomy.table()),
			});
		}

		Ok(entries.into_iter().map(|e| TaxonomyItem { id: e.id, name: e.name }).collect())
	}

	pub async fn all_issues(&self) -> Result<IssueOptions> {
		Ok(IssueOptions {
			industries: self.list_taxonomy(Taxonomy::Industry).await?,
			company_sizes: self.list_taxonomy(Taxonomy::CompanySize).await?,
			departments: self.list_taxonomy(Taxonomy::Department).await?,
			themes: self.list_taxonomy(Taxonomy::Theme).await?,
		})
	}
}
