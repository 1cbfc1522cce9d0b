//! Search and filter semantics for dogs and owners.
//!
//! The matching rules live here as plain functions over domain types so they
//! can be tested without a database. The db layer loads candidate rows with
//! their join data and delegates filtering, ordering, and the result cap to
//! this module.
//!
//! Rules (all text matching is case-insensitive substring):
//! - dog text condition: name, any owner name, any `grooming_tolerance`
//!   entry, or any `character_tags` entry; vacuously true for empty search;
//! - tag-set filters: OR within a category, AND across conditions;
//! - owners: name or owned-dog name for text, owned-dog breed substring,
//!   exact-match contact methods;
//! - ordering `updated_at_utc` descending, capped at
//!   [`crate::defaults::SEARCH_RESULT_LIMIT`].

use crate::defaults::SEARCH_RESULT_LIMIT;
use crate::models::{DogFull, Owner, OwnerSummary};

/// Dog search input.
#[derive(Debug, Clone, Default)]
pub struct DogQuery {
    /// Free-text substring, empty for "match everything".
    pub search: String,
    /// Health-tag filter against `grooming_tolerance` (OR within the set).
    pub tags: Vec<String>,
    /// Character-tag filter against `character_tags` (OR within the set).
    pub character_tags: Vec<String>,
}

/// Owner search input.
#[derive(Debug, Clone, Default)]
pub struct OwnerQuery {
    /// Free-text substring, empty for "match everything".
    pub search: String,
    /// Substring filter against any owned dog's breed.
    pub breed: String,
    /// Exact-match filter (OR-combined) against contact methods.
    pub contact_tags: Vec<String>,
}

/// Owner row with the join data the filters need.
#[derive(Debug, Clone)]
pub struct OwnerCandidate {
    pub owner: Owner,
    pub dog_count: i64,
    pub dog_names: Vec<String>,
    pub dog_breeds: Vec<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// OR within a category: does any entry's case-folded value sit in the
/// case-folded filter set?
fn intersects_ci(entries: &[String], filter: &[String]) -> bool {
    entries.iter().any(|entry| {
        let folded = entry.to_lowercase();
        filter.iter().any(|wanted| wanted.to_lowercase() == folded)
    })
}

impl DogQuery {
    /// True when every present condition holds (AND across conditions).
    pub fn matches(&self, row: &DogFull) -> bool {
        let text_ok = self.search.is_empty()
            || contains_ci(&row.dog.name, &self.search)
            || row
                .owners
                .iter()
                .any(|o| contains_ci(&o.name, &self.search))
            || row
                .dog
                .grooming_tolerance
                .iter()
                .any(|t| contains_ci(t, &self.search))
            || row
                .dog
                .character_tags
                .iter()
                .any(|t| contains_ci(t, &self.search));

        let tags_ok =
            self.tags.is_empty() || intersects_ci(&row.dog.grooming_tolerance, &self.tags);
        let character_ok = self.character_tags.is_empty()
            || intersects_ci(&row.dog.character_tags, &self.character_tags);

        text_ok && tags_ok && character_ok
    }
}

impl OwnerQuery {
    /// True when every present condition holds (AND across conditions).
    pub fn matches(&self, row: &OwnerCandidate) -> bool {
        let text_ok = self.search.is_empty()
            || contains_ci(&row.owner.name, &self.search)
            || row.dog_names.iter().any(|n| contains_ci(n, &self.search));

        let breed_ok =
            self.breed.is_empty() || row.dog_breeds.iter().any(|b| contains_ci(b, &self.breed));

        let contact_ok = self.contact_tags.is_empty()
            || row
                .owner
                .communication_methods
                .iter()
                .any(|cm| self.contact_tags.iter().any(|t| *t == cm.method));

        text_ok && breed_ok && contact_ok
    }
}

/// Filter, order by `updated_at_utc` descending, and apply the result cap.
pub fn rank_dogs(rows: Vec<DogFull>, query: &DogQuery) -> Vec<DogFull> {
    let mut hits: Vec<DogFull> = rows.into_iter().filter(|r| query.matches(r)).collect();
    hits.sort_by(|a, b| b.dog.updated_at_utc.cmp(&a.dog.updated_at_utc));
    hits.truncate(SEARCH_RESULT_LIMIT);
    hits
}

/// Filter, order by `updated_at_utc` descending, cap, and strip the join
/// data down to the summary rows callers see.
pub fn rank_owners(rows: Vec<OwnerCandidate>, query: &OwnerQuery) -> Vec<OwnerSummary> {
    let mut hits: Vec<OwnerCandidate> = rows.into_iter().filter(|r| query.matches(r)).collect();
    hits.sort_by(|a, b| b.owner.updated_at_utc.cmp(&a.owner.updated_at_utc));
    hits.truncate(SEARCH_RESULT_LIMIT);
    hits.into_iter()
        .map(|r| OwnerSummary {
            owner: r.owner,
            dog_count: r.dog_count,
        })
        .collect()
}
