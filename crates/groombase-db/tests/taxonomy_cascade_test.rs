//! Integration tests for taxonomy administration and the rename/delete
//! cascade against a real PostgreSQL database.
//!
//! Requires a running test database; see `test_fixtures` for configuration.

use groombase_db::test_fixtures::TestDatabase;
use groombase_db::{
    ContactMethod, CosmeticUse, CreateDogRequest, CreateOwnerRequest, DogRepository, Error,
    OwnerRepository, TaxonomyCategory, TaxonomyStore,
};

async fn setup() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::new().await
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let test_db = setup().await;
    let taxonomies = test_db.taxonomies();

    taxonomies.ensure_seeded().await.unwrap();
    let first = taxonomies.get(TaxonomyCategory::Breeds).await.unwrap();
    assert!(!first.is_empty());

    taxonomies.ensure_seeded().await.unwrap();
    let second = taxonomies.get(TaxonomyCategory::Breeds).await.unwrap();
    assert_eq!(first, second);

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_get_uninitialized_category_is_empty_list() {
    let test_db = setup().await;
    let values = test_db
        .taxonomies()
        .get(TaxonomyCategory::Cosmetics)
        .await
        .unwrap();
    assert!(values.is_empty());
    test_db.cleanup().await;
}

#[tokio::test]
async fn test_set_round_trips_order() {
    let test_db = setup().await;
    let taxonomies = test_db.taxonomies();

    let values = vec!["Smrdí".to_string(), "Pĺzne".to_string(), "Kúše".to_string()];
    taxonomies
        .set(TaxonomyCategory::HealthTags, values.clone())
        .await
        .unwrap();
    assert_eq!(
        taxonomies.get(TaxonomyCategory::HealthTags).await.unwrap(),
        values
    );

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_add_value_rejects_exact_duplicate() {
    let test_db = setup().await;
    let taxonomies = test_db.taxonomies();

    taxonomies
        .add_value(TaxonomyCategory::Breeds, "Labrador")
        .await
        .unwrap();
    let err = taxonomies
        .add_value(TaxonomyCategory::Breeds, "Labrador")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateValue { .. }));

    // case-sensitive storage: different casing is a distinct value
    taxonomies
        .add_value(TaxonomyCategory::Breeds, "labrador")
        .await
        .unwrap();
    assert_eq!(
        taxonomies.get(TaxonomyCategory::Breeds).await.unwrap(),
        vec!["Labrador".to_string(), "labrador".to_string()]
    );

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_rename_cascades_into_grooming_tolerance() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();
    let dogs = test_db.dogs();

    test_db
        .taxonomies()
        .set(
            TaxonomyCategory::HealthTags,
            vec!["Smrdí".to_string(), "Pĺzne".to_string(), "Kúše".to_string()],
        )
        .await
        .unwrap();

    let rex = dogs
        .insert(CreateDogRequest {
            name: "Rex".to_string(),
            grooming_tolerance: vec!["Smrdí".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    let fido = dogs
        .insert(CreateDogRequest {
            name: "Fido".to_string(),
            grooming_tolerance: vec!["Pĺzne".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    let fido_before = dogs.fetch(fido).await.unwrap();

    let list = admin
        .rename_value(TaxonomyCategory::HealthTags, "Smrdí", "Zapáchajúci")
        .await
        .unwrap();

    assert_eq!(
        list,
        vec![
            "Zapáchajúci".to_string(),
            "Pĺzne".to_string(),
            "Kúše".to_string()
        ]
    );
    let rex_after = dogs.fetch(rex).await.unwrap();
    assert_eq!(rex_after.dog.grooming_tolerance, vec!["Zapáchajúci"]);

    // untouched dog keeps its timestamp
    let fido_after = dogs.fetch(fido).await.unwrap();
    assert_eq!(fido_after.dog.grooming_tolerance, vec!["Pĺzne"]);
    assert_eq!(fido_after.dog.updated_at_utc, fido_before.dog.updated_at_utc);

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_rename_cosmetic_preserves_notes() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();
    let dogs = test_db.dogs();

    test_db
        .taxonomies()
        .set(
            TaxonomyCategory::Cosmetics,
            vec!["Oatmeal shampoo".to_string()],
        )
        .await
        .unwrap();

    let id = dogs
        .insert(CreateDogRequest {
            name: "Dunčo".to_string(),
            cosmetics_used: vec![CosmeticUse {
                product: "Oatmeal shampoo".to_string(),
                notes: "diluted 1:10, avoid eyes".to_string(),
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    admin
        .rename_value(TaxonomyCategory::Cosmetics, "Oatmeal shampoo", "Oat wash")
        .await
        .unwrap();

    let dog = dogs.fetch(id).await.unwrap().dog;
    assert_eq!(dog.cosmetics_used[0].product, "Oat wash");
    assert_eq!(dog.cosmetics_used[0].notes, "diluted 1:10, avoid eyes");

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_rename_communication_method_cascades_into_owners() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();
    let owners = test_db.owners();

    test_db
        .taxonomies()
        .set(
            TaxonomyCategory::CommunicationMethods,
            vec!["Phone".to_string(), "Email".to_string()],
        )
        .await
        .unwrap();

    let id = owners
        .insert(CreateOwnerRequest {
            name: "Jana Kováčová".to_string(),
            communication_methods: vec![ContactMethod {
                method: "Phone".to_string(),
                details: "+421 900 123 456".to_string(),
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    admin
        .rename_value(TaxonomyCategory::CommunicationMethods, "Phone", "Mobile")
        .await
        .unwrap();

    let owner = owners.fetch(id).await.unwrap();
    assert_eq!(owner.communication_methods[0].method, "Mobile");
    assert_eq!(owner.communication_methods[0].details, "+421 900 123 456");

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_delete_breed_clears_scalar_and_list() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();
    let dogs = test_db.dogs();

    test_db
        .taxonomies()
        .set(
            TaxonomyCategory::Breeds,
            vec!["Labrador".to_string(), "Pudel".to_string()],
        )
        .await
        .unwrap();

    let lab = dogs
        .insert(CreateDogRequest {
            name: "Rex".to_string(),
            breed: Some("Labrador".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let pudel = dogs
        .insert(CreateDogRequest {
            name: "Bodrík".to_string(),
            breed: Some("Pudel".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let list = admin
        .delete_value(TaxonomyCategory::Breeds, "Labrador")
        .await
        .unwrap();

    assert_eq!(list, vec!["Pudel".to_string()]);
    assert_eq!(dogs.fetch(lab).await.unwrap().dog.breed, None);
    assert_eq!(
        dogs.fetch(pudel).await.unwrap().dog.breed,
        Some("Pudel".to_string())
    );

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_noop_rename_changes_nothing() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();

    test_db
        .taxonomies()
        .set(TaxonomyCategory::HealthTags, vec!["Smrdí".to_string()])
        .await
        .unwrap();

    let list = admin
        .rename_value(TaxonomyCategory::HealthTags, "Smrdí", "Smrdí")
        .await
        .unwrap();
    assert_eq!(list, vec!["Smrdí".to_string()]);

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_rename_to_existing_value_is_rejected() {
    let test_db = setup().await;
    let admin = test_db.db.taxonomy_admin();

    test_db
        .taxonomies()
        .set(
            TaxonomyCategory::HealthTags,
            vec!["Smrdí".to_string(), "Kúše".to_string()],
        )
        .await
        .unwrap();

    let err = admin
        .rename_value(TaxonomyCategory::HealthTags, "Smrdí", "Kúše")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateValue { .. }));

    // list unchanged
    assert_eq!(
        test_db
            .taxonomies()
            .get(TaxonomyCategory::HealthTags)
            .await
            .unwrap(),
        vec!["Smrdí".to_string(), "Kúše".to_string()]
    );

    test_db.cleanup().await;
}
