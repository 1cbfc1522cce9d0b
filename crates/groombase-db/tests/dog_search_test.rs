//! Integration tests for dog and owner search against a real PostgreSQL
//! database.

use groombase_db::test_fixtures::TestDatabase;
use groombase_db::{
    ContactMethod, CreateDogRequest, CreateOwnerRequest, DogQuery, DogRepository, OwnerQuery,
    OwnerRepository,
};

async fn setup() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::new().await
}

async fn insert_dog(test_db: &TestDatabase, name: &str, tolerance: &[&str]) -> uuid::Uuid {
    test_db
        .dogs()
        .insert(CreateDogRequest {
            name: name.to_string(),
            grooming_tolerance: tolerance.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let test_db = setup().await;
    insert_dog(&test_db, "Buddy", &[]).await;
    insert_dog(&test_db, "Rex", &[]).await;

    let upper = test_db
        .dogs()
        .list(DogQuery {
            search: "BUDDY".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let lower = test_db
        .dogs()
        .list(DogQuery {
            search: "buddy".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].dog.name, "Buddy");
    assert_eq!(
        upper.iter().map(|d| d.dog.id).collect::<Vec<_>>(),
        lower.iter().map(|d| d.dog.id).collect::<Vec<_>>()
    );

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_search_matches_owner_name() {
    let test_db = setup().await;
    let dog_id = insert_dog(&test_db, "Rex", &[]).await;
    let owner_id = test_db
        .owners()
        .insert(CreateOwnerRequest {
            name: "Jana Kováčová".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    test_db.dogs().link_owner(dog_id, owner_id).await.unwrap();

    let hits = test_db
        .dogs()
        .list(DogQuery {
            search: "kováč".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].dog.name, "Rex");
    assert_eq!(hits[0].owners[0].name, "Jana Kováčová");

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_tag_filter_or_within_and_across_categories() {
    let test_db = setup().await;
    test_db
        .dogs()
        .insert(CreateDogRequest {
            name: "Rex".to_string(),
            grooming_tolerance: vec!["Sensitive skin".to_string()],
            character_tags: vec!["Calm".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();

    // OR within the health-tag set
    let hits = test_db
        .dogs()
        .list(DogQuery {
            tags: vec!["Arthritic".to_string(), "sensitive skin".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);

    // AND across the two tag categories
    let hits = test_db
        .dogs()
        .list(DogQuery {
            tags: vec!["Sensitive skin".to_string()],
            character_tags: vec!["Anxious".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(hits.is_empty());

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_unmatched_tag_filter_returns_empty_list() {
    let test_db = setup().await;
    insert_dog(&test_db, "Rex", &["Matted coat"]).await;

    let hits = test_db
        .dogs()
        .list(DogQuery {
            tags: vec!["friendly".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(hits.is_empty());

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_results_are_newest_updated_first_and_capped_at_50() {
    let test_db = setup().await;
    for i in 0..55 {
        insert_dog(&test_db, &format!("dog-{:02}", i), &[]).await;
    }

    let hits = test_db.dogs().list(DogQuery::default()).await.unwrap();
    assert_eq!(hits.len(), 50);
    for pair in hits.windows(2) {
        assert!(pair[0].dog.updated_at_utc >= pair[1].dog.updated_at_utc);
    }

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_owner_search_by_breed_and_contact_tags() {
    let test_db = setup().await;
    let owners = test_db.owners();

    let jana = owners
        .insert(CreateOwnerRequest {
            name: "Jana".to_string(),
            communication_methods: vec![ContactMethod {
                method: "Phone".to_string(),
                details: "+421 900 111 222".to_string(),
            }],
            ..Default::default()
        })
        .await
        .unwrap();
    let petra = owners
        .insert(CreateOwnerRequest {
            name: "Petra".to_string(),
            communication_methods: vec![ContactMethod {
                method: "Email".to_string(),
                details: "petra@example.com".to_string(),
            }],
            ..Default::default()
        })
        .await
        .unwrap();

    let retriever = test_db
        .dogs()
        .insert(CreateDogRequest {
            name: "Rex".to_string(),
            breed: Some("Golden Retriever".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    test_db.dogs().link_owner(retriever, jana).await.unwrap();

    // breed is substring, case-insensitive, against any owned dog
    let hits = owners
        .list(OwnerQuery {
            breed: "retriev".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].owner.id, jana);
    assert_eq!(hits[0].dog_count, 1);

    // contact tags are exact match, OR-combined
    let hits = owners
        .list(OwnerQuery {
            contact_tags: vec!["Email".to_string(), "SMS".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].owner.id, petra);
    assert_eq!(hits[0].dog_count, 0);

    test_db.cleanup().await;
}

#[tokio::test]
async fn test_owner_search_text_matches_owned_dog_name() {
    let test_db = setup().await;
    let owner_id = test_db
        .owners()
        .insert(CreateOwnerRequest {
            name: "Marta".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let dog_id = insert_dog(&test_db, "Aibo", &[]).await;
    test_db.dogs().link_owner(dog_id, owner_id).await.unwrap();

    let hits = test_db
        .owners()
        .list(OwnerQuery {
            search: "aibo".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].owner.name, "Marta");

    test_db.cleanup().await;
}
