//! Core data models for groombase.
//!
//! These types are shared across all groombase crates and represent the
//! salon's domain entities. Tag-like fields (`grooming_tolerance`,
//! `character_tags`, `breed`, `cosmetics_used[].product`,
//! `communication_methods[].method`) hold denormalized copies of taxonomy
//! values — plain strings, matched by exact equality, never foreign keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// DOG TYPES
// =============================================================================

/// A cosmetic product applied to a dog, with free-text usage notes.
///
/// `product` is denormalized from the `cosmetics` taxonomy; `notes` is an
/// opaque payload that must survive taxonomy renames untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmeticUse {
    pub product: String,
    #[serde(default)]
    pub notes: String,
}

/// A dog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: Uuid,
    pub name: String,
    /// Free text sourced from the `breeds` taxonomy; single-valued by design.
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub grooming_time_minutes: Option<i32>,
    /// Denormalized from `health_tags`; display order preserved.
    #[serde(default)]
    pub grooming_tolerance: Vec<String>,
    /// Denormalized from `character_tags`.
    #[serde(default)]
    pub character_tags: Vec<String>,
    /// Denormalized from `cosmetics` via `CosmeticUse::product`.
    #[serde(default)]
    pub cosmetics_used: Vec<CosmeticUse>,
    /// Opaque rich text, pass-through only.
    pub behavior_notes: Option<String>,
    pub health_notes: Option<String>,
    pub character_notes: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// Lightweight owner reference attached to dog rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: Uuid,
    pub name: String,
}

/// A dog together with its associated owners, sorted by owner name ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogFull {
    #[serde(flatten)]
    pub dog: Dog,
    pub owners: Vec<OwnerRef>,
}

/// Request for creating a new dog. Name is required; everything else defaults
/// to empty/None.
#[derive(Debug, Clone, Default)]
pub struct CreateDogRequest {
    pub name: String,
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub grooming_time_minutes: Option<i32>,
    pub grooming_tolerance: Vec<String>,
    pub character_tags: Vec<String>,
    pub cosmetics_used: Vec<CosmeticUse>,
    pub behavior_notes: Option<String>,
    pub health_notes: Option<String>,
    pub character_notes: Option<String>,
}

/// Full-record replace payload for a dog update.
///
/// Every mutable field must be supplied; the repository writes the record
/// wholesale and touches `updated_at_utc`. Partial-field updates are
/// deliberately not supported at this layer.
#[derive(Debug, Clone, Default)]
pub struct UpdateDogRequest {
    pub name: String,
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub grooming_time_minutes: Option<i32>,
    pub grooming_tolerance: Vec<String>,
    pub character_tags: Vec<String>,
    pub cosmetics_used: Vec<CosmeticUse>,
    pub behavior_notes: Option<String>,
    pub health_notes: Option<String>,
    pub character_notes: Option<String>,
}

impl From<&Dog> for UpdateDogRequest {
    /// Snapshot a dog's current mutable state, ready for an in-place rewrite.
    fn from(dog: &Dog) -> Self {
        Self {
            name: dog.name.clone(),
            breed: dog.breed.clone(),
            weight_kg: dog.weight_kg,
            birthdate: dog.birthdate,
            grooming_time_minutes: dog.grooming_time_minutes,
            grooming_tolerance: dog.grooming_tolerance.clone(),
            character_tags: dog.character_tags.clone(),
            cosmetics_used: dog.cosmetics_used.clone(),
            behavior_notes: dog.behavior_notes.clone(),
            health_notes: dog.health_notes.clone(),
            character_notes: dog.character_notes.clone(),
        }
    }
}

// =============================================================================
// OWNER TYPES
// =============================================================================

/// A way of reaching an owner, with free-text details (number, handle, ...).
///
/// `method` is denormalized from the `communication_methods` taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMethod {
    pub method: String,
    #[serde(default)]
    pub details: String,
}

/// An owner record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub name: String,
    /// Denormalized from `communication_methods` via `ContactMethod::method`.
    #[serde(default)]
    pub communication_methods: Vec<ContactMethod>,
    /// Opaque rich text, pass-through only.
    pub important_info: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// An owner row annotated with the number of dogs linked to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    #[serde(flatten)]
    pub owner: Owner,
    pub dog_count: i64,
}

/// Request for creating a new owner.
#[derive(Debug, Clone, Default)]
pub struct CreateOwnerRequest {
    pub name: String,
    pub communication_methods: Vec<ContactMethod>,
    pub important_info: Option<String>,
}

/// Full-record replace payload for an owner update (same contract as
/// [`UpdateDogRequest`]).
#[derive(Debug, Clone, Default)]
pub struct UpdateOwnerRequest {
    pub name: String,
    pub communication_methods: Vec<ContactMethod>,
    pub important_info: Option<String>,
}

impl From<&Owner> for UpdateOwnerRequest {
    fn from(owner: &Owner) -> Self {
        Self {
            name: owner.name.clone(),
            communication_methods: owner.communication_methods.clone(),
            important_info: owner.important_info.clone(),
        }
    }
}

/// Validate a required entity name.
pub fn validate_entity_name(name: &str) -> crate::error::Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(crate::error::Error::InvalidInput(
            "name is required".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dog() -> Dog {
        Dog {
            id: Uuid::now_v7(),
            name: "Rex".to_string(),
            breed: Some("Labrador".to_string()),
            weight_kg: Some(31.5),
            birthdate: NaiveDate::from_ymd_opt(2021, 4, 2),
            grooming_time_minutes: Some(90),
            grooming_tolerance: vec!["Smrdí".to_string()],
            character_tags: vec!["Playful".to_string()],
            cosmetics_used: vec![CosmeticUse {
                product: "Oatmeal shampoo".to_string(),
                notes: "diluted 1:10".to_string(),
            }],
            behavior_notes: Some("<p>pulls on the lead</p>".to_string()),
            health_notes: None,
            character_notes: None,
            created_at_utc: Utc::now(),
            updated_at_utc: Utc::now(),
        }
    }

    #[test]
    fn test_update_request_snapshots_every_mutable_field() {
        let dog = sample_dog();
        let req = UpdateDogRequest::from(&dog);
        assert_eq!(req.name, dog.name);
        assert_eq!(req.breed, dog.breed);
        assert_eq!(req.grooming_tolerance, dog.grooming_tolerance);
        assert_eq!(req.cosmetics_used, dog.cosmetics_used);
        assert_eq!(req.behavior_notes, dog.behavior_notes);
    }

    #[test]
    fn test_dog_full_serializes_flattened() {
        let full = DogFull {
            dog: sample_dog(),
            owners: vec![OwnerRef {
                id: Uuid::nil(),
                name: "Jana".to_string(),
            }],
        };
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["name"], "Rex");
        assert_eq!(json["owners"][0]["name"], "Jana");
    }

    #[test]
    fn test_cosmetic_use_notes_default_to_empty() {
        let parsed: CosmeticUse =
            serde_json::from_str(r#"{"product": "Detangler"}"#).unwrap();
        assert_eq!(parsed.notes, "");
    }

    #[test]
    fn test_validate_entity_name() {
        assert_eq!(validate_entity_name(" Fido ").unwrap(), "Fido");
        assert!(validate_entity_name("  ").is_err());
    }
}
