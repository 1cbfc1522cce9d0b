//! Taxonomy administration and the rename/delete cascade.
//!
//! Taxonomy values are denormalized into entity fields as plain strings, so
//! renaming or deleting a canonical value means rewriting every entity that
//! carries a copy. One scan-and-rewrite routine serves all five categories,
//! parameterized by the binding table in [`crate::taxonomy`] and a per-field
//! [`Rewrite`] (substitute or remove).
//!
//! Ordering contract: entity rewrites are applied **sequentially, one await
//! at a time, before** the taxonomy list is written. A rewrite failure aborts
//! immediately — entities already rewritten stay rewritten, the taxonomy list
//! stays unchanged, and the caller gets [`Error::Cascade`]. Retrying the same
//! operation re-scans and picks up the stragglers, since the old value is
//! still canonical. There is no rollback and no wrapping transaction; see the
//! error-handling notes in DESIGN.md before "fixing" that.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{Dog, Owner, UpdateDogRequest, UpdateOwnerRequest};
use crate::taxonomy::{validate_taxonomy_value, EntityKind, FieldBinding, TaxonomyCategory};
use crate::traits::{DogRepository, OwnerRepository, TaxonomyStore};

/// What to do with each denormalized occurrence of the target value.
#[derive(Debug, Clone, Copy)]
enum Rewrite<'a> {
    Substitute(&'a str),
    Remove,
}

/// Admin surface for taxonomy mutations. All writes to category lists go
/// through here so the entity cascade can never be skipped.
pub struct TaxonomyAdmin {
    store: Arc<dyn TaxonomyStore>,
    dogs: Arc<dyn DogRepository>,
    owners: Arc<dyn OwnerRepository>,
}

impl TaxonomyAdmin {
    pub fn new(
        store: Arc<dyn TaxonomyStore>,
        dogs: Arc<dyn DogRepository>,
        owners: Arc<dyn OwnerRepository>,
    ) -> Self {
        Self {
            store,
            dogs,
            owners,
        }
    }

    /// Append a new value to a category.
    ///
    /// No entity scan: nothing can reference a value that did not exist.
    pub async fn add_value(&self, category: TaxonomyCategory, value: &str) -> Result<Vec<String>> {
        let value = validate_taxonomy_value(value)?;
        let mut values = self.store.get(category).await?;
        if values.iter().any(|v| v == value) {
            return Err(Error::DuplicateValue {
                category,
                value: value.to_string(),
            });
        }
        values.push(value.to_string());
        self.store.set(category, values.clone()).await?;
        debug!(
            subsystem = "taxonomy",
            component = "admin",
            op = "add",
            category = %category,
            "Added taxonomy value"
        );
        Ok(values)
    }

    /// Rename `old` to `new` in a category, rewriting every entity that
    /// denormalizes `old` before the list itself is committed.
    pub async fn rename_value(
        &self,
        category: TaxonomyCategory,
        old: &str,
        new: &str,
    ) -> Result<Vec<String>> {
        let new = validate_taxonomy_value(new)?;
        if new == old {
            // No-op rename succeeds trivially; nothing is mutated.
            return self.store.get(category).await;
        }

        let values = self.store.get(category).await?;
        if !values.iter().any(|v| v == old) {
            return Err(Error::NotFound(format!(
                "taxonomy {} has no value '{}'",
                category, old
            )));
        }
        if values.iter().any(|v| v == new) {
            return Err(Error::DuplicateValue {
                category,
                value: new.to_string(),
            });
        }

        let applied = self
            .cascade(category, old, Rewrite::Substitute(new))
            .await?;

        // Entities first, list second: a crash here leaves `old` canonical
        // and partially propagated, never a dangling reference.
        let updated: Vec<String> = values
            .into_iter()
            .map(|v| if v == old { new.to_string() } else { v })
            .collect();
        self.store.set(category, updated.clone()).await?;

        info!(
            subsystem = "taxonomy",
            component = "admin",
            op = "rename",
            category = %category,
            entities_rewritten = applied,
            "Renamed taxonomy value"
        );
        Ok(updated)
    }

    /// Delete a value from a category, stripping it from every entity that
    /// denormalizes it before the list itself is committed.
    pub async fn delete_value(
        &self,
        category: TaxonomyCategory,
        value: &str,
    ) -> Result<Vec<String>> {
        let values = self.store.get(category).await?;
        if !values.iter().any(|v| v == value) {
            return Err(Error::NotFound(format!(
                "taxonomy {} has no value '{}'",
                category, value
            )));
        }

        let applied = self.cascade(category, value, Rewrite::Remove).await?;

        let updated: Vec<String> = values.into_iter().filter(|v| v != value).collect();
        self.store.set(category, updated.clone()).await?;

        info!(
            subsystem = "taxonomy",
            component = "admin",
            op = "delete",
            category = %category,
            entities_rewritten = applied,
            "Deleted taxonomy value"
        );
        Ok(updated)
    }

    /// Scan-and-rewrite walk shared by rename and delete.
    ///
    /// Rewrites run one at a time; the first failure aborts the walk and is
    /// surfaced as [`Error::Cascade`] with the number of updates already
    /// committed.
    async fn cascade(
        &self,
        category: TaxonomyCategory,
        value: &str,
        rewrite: Rewrite<'_>,
    ) -> Result<usize> {
        let mut applied = 0usize;
        match category.entity_kind() {
            EntityKind::Dog => {
                for dog in self.dogs.list_all().await? {
                    let Some(req) = rewritten_dog(&dog, category, value, rewrite) else {
                        continue;
                    };
                    if let Err(e) = self.dogs.update(dog.id, req).await {
                        warn!(
                            subsystem = "taxonomy",
                            component = "cascade",
                            category = %category,
                            dog_id = %dog.id,
                            applied = applied,
                            error = %e,
                            "Cascade aborted mid-walk"
                        );
                        return Err(Error::Cascade {
                            category,
                            applied,
                            source: Box::new(e),
                        });
                    }
                    applied += 1;
                }
            }
            EntityKind::Owner => {
                for owner in self.owners.list_all().await? {
                    let Some(req) = rewritten_owner(&owner, category, value, rewrite) else {
                        continue;
                    };
                    if let Err(e) = self.owners.update(owner.id, req).await {
                        warn!(
                            subsystem = "taxonomy",
                            component = "cascade",
                            category = %category,
                            owner_id = %owner.id,
                            applied = applied,
                            error = %e,
                            "Cascade aborted mid-walk"
                        );
                        return Err(Error::Cascade {
                            category,
                            applied,
                            source: Box::new(e),
                        });
                    }
                    applied += 1;
                }
            }
        }
        Ok(applied)
    }
}

/// Apply a rewrite to a string-set field in place. Substitution preserves the
/// entry's position; removal drops it.
fn rewrite_set(entries: &mut Vec<String>, value: &str, rewrite: Rewrite<'_>) -> bool {
    match rewrite {
        Rewrite::Substitute(new) => {
            let mut changed = false;
            for entry in entries.iter_mut() {
                if entry == value {
                    *entry = new.to_string();
                    changed = true;
                }
            }
            changed
        }
        Rewrite::Remove => {
            let before = entries.len();
            entries.retain(|e| e != value);
            entries.len() != before
        }
    }
}

/// Apply a rewrite to the scalar breed field. Removal clears it to `None`.
fn rewrite_scalar(slot: &mut Option<String>, value: &str, rewrite: Rewrite<'_>) -> bool {
    if slot.as_deref() != Some(value) {
        return false;
    }
    *slot = match rewrite {
        Rewrite::Substitute(new) => Some(new.to_string()),
        Rewrite::Remove => None,
    };
    true
}

/// Build the full-record update for a dog touched by the cascade, or `None`
/// if its bound field does not contain the value.
fn rewritten_dog(
    dog: &Dog,
    category: TaxonomyCategory,
    value: &str,
    rewrite: Rewrite<'_>,
) -> Option<UpdateDogRequest> {
    let mut draft = dog.clone();
    let changed = match category.binding() {
        FieldBinding::GroomingTolerance => {
            rewrite_set(&mut draft.grooming_tolerance, value, rewrite)
        }
        FieldBinding::CharacterTags => rewrite_set(&mut draft.character_tags, value, rewrite),
        FieldBinding::Breed => rewrite_scalar(&mut draft.breed, value, rewrite),
        FieldBinding::CosmeticProduct => match rewrite {
            // Membership by key: the notes payload rides along untouched.
            Rewrite::Substitute(new) => {
                let mut changed = false;
                for entry in draft.cosmetics_used.iter_mut() {
                    if entry.product == value {
                        entry.product = new.to_string();
                        changed = true;
                    }
                }
                changed
            }
            Rewrite::Remove => {
                let before = draft.cosmetics_used.len();
                draft.cosmetics_used.retain(|e| e.product != value);
                draft.cosmetics_used.len() != before
            }
        },
        FieldBinding::ContactMethod => return None,
    };
    changed.then(|| UpdateDogRequest::from(&draft))
}

/// Build the full-record update for an owner touched by the cascade, or
/// `None` if its bound field does not contain the value.
fn rewritten_owner(
    owner: &Owner,
    category: TaxonomyCategory,
    value: &str,
    rewrite: Rewrite<'_>,
) -> Option<UpdateOwnerRequest> {
    if category.binding() != FieldBinding::ContactMethod {
        return None;
    }
    let mut draft = owner.clone();
    let changed = match rewrite {
        Rewrite::Substitute(new) => {
            let mut changed = false;
            for entry in draft.communication_methods.iter_mut() {
                if entry.method == value {
                    entry.method = new.to_string();
                    changed = true;
                }
            }
            changed
        }
        Rewrite::Remove => {
            let before = draft.communication_methods.len();
            draft.communication_methods.retain(|e| e.method != value);
            draft.communication_methods.len() != before
        }
    };
    changed.then(|| UpdateOwnerRequest::from(&draft))
}
