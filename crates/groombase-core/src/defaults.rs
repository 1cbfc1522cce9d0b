//! Centralized default constants for the groombase system.
//!
//! **This module is the single source of truth** for shared default values:
//! seed taxonomies applied at first boot and result-size limits. Crates should
//! reference these constants instead of defining their own magic values.

use crate::taxonomy::TaxonomyCategory;

// =============================================================================
// SEARCH
// =============================================================================

/// Hard cap on rows returned by dog/owner searches.
pub const SEARCH_RESULT_LIMIT: usize = 50;

// =============================================================================
// SEED TAXONOMIES
// =============================================================================

/// Default `health_tags` list seeded at first boot.
pub const DEFAULT_HEALTH_TAGS: &[&str] = &[
    "Sensitive skin",
    "Ear infections",
    "Matted coat",
    "Bites when brushed",
    "Arthritic",
];

/// Default `character_tags` list seeded at first boot.
pub const DEFAULT_CHARACTER_TAGS: &[&str] = &[
    "Calm",
    "Anxious",
    "Playful",
    "Dominant",
    "Shy",
];

/// Default `breeds` list seeded at first boot.
pub const DEFAULT_BREEDS: &[&str] = &[
    "Labrador",
    "Poodle",
    "Golden Retriever",
    "Yorkshire Terrier",
    "Shih Tzu",
    "Cocker Spaniel",
];

/// Default `cosmetics` list seeded at first boot.
pub const DEFAULT_COSMETICS: &[&str] = &[
    "Oatmeal shampoo",
    "Whitening shampoo",
    "Detangling spray",
    "Ear cleaner",
    "Paw balm",
];

/// Default `communication_methods` list seeded at first boot.
pub const DEFAULT_COMMUNICATION_METHODS: &[&str] = &["Phone", "SMS", "Email", "WhatsApp"];

/// Seed values for a category, used when its list was never written.
pub fn seed_values(category: TaxonomyCategory) -> Vec<String> {
    let values: &[&str] = match category {
        TaxonomyCategory::HealthTags => DEFAULT_HEALTH_TAGS,
        TaxonomyCategory::CharacterTags => DEFAULT_CHARACTER_TAGS,
        TaxonomyCategory::Breeds => DEFAULT_BREEDS,
        TaxonomyCategory::Cosmetics => DEFAULT_COSMETICS,
        TaxonomyCategory::CommunicationMethods => DEFAULT_COMMUNICATION_METHODS,
    };
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_seed_values() {
        for category in TaxonomyCategory::ALL {
            assert!(!seed_values(category).is_empty(), "{} has no seeds", category);
        }
    }

    #[test]
    fn test_seed_lists_contain_no_duplicates() {
        for category in TaxonomyCategory::ALL {
            let values = seed_values(category);
            let mut deduped = values.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), values.len(), "{} seeds duplicate", category);
        }
    }
}
