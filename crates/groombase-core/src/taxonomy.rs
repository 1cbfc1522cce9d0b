//! Taxonomy categories and their entity-field bindings.
//!
//! Taxonomy values are denormalized: an entity stores the value itself as a
//! string, not a reference to the taxonomy row. The binding table below is the
//! single authority for which entity field each category feeds and what shape
//! that field has, so the cascade engine and the search layer never have to
//! infer the mapping from naming conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The five admin-editable enumerations.
///
/// Each category is persisted as one ordered list of unique strings under its
/// `key`. Categories are never created or deleted at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyCategory {
    HealthTags,
    CharacterTags,
    Breeds,
    Cosmetics,
    CommunicationMethods,
}

/// Which entity kind a category's values are denormalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Dog,
    Owner,
}

/// Shape of the denormalized field a category feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBinding {
    /// `Dog::grooming_tolerance` — set of strings, display order preserved.
    GroomingTolerance,
    /// `Dog::character_tags` — set of strings.
    CharacterTags,
    /// `Dog::breed` — optional scalar (single-valued by design).
    Breed,
    /// `Dog::cosmetics_used[].product` — membership by key in an array of
    /// objects; the attached `notes` payload rides along on rewrite.
    CosmeticProduct,
    /// `Owner::communication_methods[].method` — membership by key, `details`
    /// payload rides along.
    ContactMethod,
}

impl TaxonomyCategory {
    /// All categories, in seed order.
    pub const ALL: [TaxonomyCategory; 5] = [
        TaxonomyCategory::HealthTags,
        TaxonomyCategory::CharacterTags,
        TaxonomyCategory::Breeds,
        TaxonomyCategory::Cosmetics,
        TaxonomyCategory::CommunicationMethods,
    ];

    /// Stable storage key for this category.
    pub fn key(self) -> &'static str {
        match self {
            TaxonomyCategory::HealthTags => "health_tags",
            TaxonomyCategory::CharacterTags => "character_tags",
            TaxonomyCategory::Breeds => "breeds",
            TaxonomyCategory::Cosmetics => "cosmetics",
            TaxonomyCategory::CommunicationMethods => "communication_methods",
        }
    }

    /// The entity kind whose records a cascade on this category must scan.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            TaxonomyCategory::CommunicationMethods => EntityKind::Owner,
            _ => EntityKind::Dog,
        }
    }

    /// The denormalized field this category feeds.
    pub fn binding(self) -> FieldBinding {
        match self {
            TaxonomyCategory::HealthTags => FieldBinding::GroomingTolerance,
            TaxonomyCategory::CharacterTags => FieldBinding::CharacterTags,
            TaxonomyCategory::Breeds => FieldBinding::Breed,
            TaxonomyCategory::Cosmetics => FieldBinding::CosmeticProduct,
            TaxonomyCategory::CommunicationMethods => FieldBinding::ContactMethod,
        }
    }
}

impl fmt::Display for TaxonomyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TaxonomyCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "health_tags" => Ok(TaxonomyCategory::HealthTags),
            "character_tags" => Ok(TaxonomyCategory::CharacterTags),
            "breeds" => Ok(TaxonomyCategory::Breeds),
            "cosmetics" => Ok(TaxonomyCategory::Cosmetics),
            "communication_methods" => Ok(TaxonomyCategory::CommunicationMethods),
            other => Err(Error::InvalidInput(format!(
                "unknown taxonomy category: {}",
                other
            ))),
        }
    }
}

/// Validate a taxonomy value before it enters a category list.
///
/// Values are stored exactly as given (no case folding, no normalization);
/// the only rule is that a value must not trim to the empty string.
pub fn validate_taxonomy_value(value: &str) -> crate::error::Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "taxonomy value cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}
