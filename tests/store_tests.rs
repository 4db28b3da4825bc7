// Storage backend tests: remote REST client against a mock server, and the
// remote-to-local fallback composition

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockito::Matcher;
use tinker_hearts::models::{CompatibilityRecord, Gender, NewSubmission, TargetGender};
use tinker_hearts::services::{
    CalculationStore, FallbackCalculationStore, LocalCalculationStore, MatchResultStore,
    MemoryStore, StoreError, SubmissionStore, SupabaseClient, SupabaseTables,
};

/// Store whose every call fails like an unreachable backend
struct UnreachableStore;

#[async_trait]
impl CalculationStore for UnreachableStore {
    async fn save(&self, _record: &CompatibilityRecord) -> Result<CompatibilityRecord, StoreError> {
        Err(StoreError::Api {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    async fn list(&self, _limit: usize) -> Result<Vec<CompatibilityRecord>, StoreError> {
        Err(StoreError::Api {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

fn client(server: &mockito::ServerGuard) -> SupabaseClient {
    SupabaseClient::new(server.url(), "test_key".to_string(), SupabaseTables::default()).unwrap()
}

#[tokio::test]
async fn test_fallback_saves_locally_when_remote_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FallbackCalculationStore::new(
        UnreachableStore,
        LocalCalculationStore::new(dir.path().join("calcs.json")),
    );

    let saved = store
        .save(&CompatibilityRecord::compute("Alice", "Bob"))
        .await
        .unwrap();
    assert!(saved.id().is_some());
    assert_eq!(saved.percentage(), 60);

    let listed = store.list(10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), saved.id());
}

#[tokio::test]
async fn test_fallback_prefers_primary() {
    let dir = tempfile::tempdir().unwrap();
    let local = LocalCalculationStore::new(dir.path().join("calcs.json"));
    let store = FallbackCalculationStore::new(MemoryStore::new(), local);

    store
        .save(&CompatibilityRecord::compute("a", "b"))
        .await
        .unwrap();

    assert_eq!(CalculationStore::list(store.primary(), 10).await.unwrap().len(), 1);
    assert!(store.fallback().list(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fallback_listing_includes_records_cached_during_outage() {
    let dir = tempfile::tempdir().unwrap();
    let store = FallbackCalculationStore::new(
        MemoryStore::new(),
        LocalCalculationStore::new(dir.path().join("calcs.json")),
    );

    let outage = Utc.with_ymd_and_hms(2025, 2, 14, 10, 0, 0).unwrap();
    let recovered = Utc.with_ymd_and_hms(2025, 2, 14, 11, 0, 0).unwrap();

    store
        .fallback()
        .save(&CompatibilityRecord::compute_at("Romeo", "Juliet", outage))
        .await
        .unwrap();
    store
        .save(&CompatibilityRecord::compute_at("Alice", "Bob", recovered))
        .await
        .unwrap();

    let listed = store.list(10).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].first_name(), "Alice");
    assert_eq!(listed[1].first_name(), "Romeo");

    let newest = store.list(1).await.unwrap();
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].first_name(), "Alice");
}

#[tokio::test]
async fn test_fallback_surfaces_error_when_both_fail() {
    let store = FallbackCalculationStore::new(UnreachableStore, UnreachableStore);
    assert!(store.list(5).await.is_err());
}

#[tokio::test]
async fn test_remote_insert_submission() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/tinker_hearts_submissions")
        .match_header("apikey", "test_key")
        .match_header("authorization", "Bearer test_key")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "name": "Anu",
            "gender": "female",
            "target_gender": "endhelum-madhi"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"2b7c","name":"Anu","gender":"female","target_gender":"endhelum-madhi",
                "pickup_line":"hi","class":"CS 2024","created_at":"2025-02-14T09:30:00+00:00"}]"#,
        )
        .create_async()
        .await;

    let stored = client(&server)
        .insert(&NewSubmission {
            name: "Anu".to_string(),
            gender: Gender::Female,
            target_gender: TargetGender::Any,
            pickup_line: "hi".to_string(),
            class: "CS 2024".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(stored.id, "2b7c");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_list_submissions_orders_newest_first() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/tinker_hearts_submissions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let submissions = SubmissionStore::list(&client(&server)).await.unwrap();

    assert!(submissions.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_delete_missing_submission_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/rest/v1/tinker_hearts_submissions")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.missing".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let result = client(&server).delete("missing").await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_remote_delete_all_uses_nil_uuid_filter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/rest/v1/tinker_hearts_submissions")
        .match_query(Matcher::UrlEncoded(
            "id".into(),
            "neq.00000000-0000-0000-0000-000000000000".into(),
        ))
        .with_status(204)
        .create_async()
        .await;

    client(&server).delete_all().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_match_lookup() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/match_results")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("name".into(), "eq.Romeo".into()),
            Matcher::UrlEncoded("class".into(), "eq.CS 2024".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"m1","name":"Romeo","class":"CS 2024","match_name":"Juliet","match_class":"ECE 2025"}]"#,
        )
        .create_async()
        .await;

    let found = client(&server).find(" Romeo ", "CS 2024").await.unwrap();

    let found = found.unwrap();
    assert_eq!(found.match_name, "Juliet");
    assert_eq!(found.message, None);
}

#[tokio::test]
async fn test_remote_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/match_results")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let result = client(&server).find("Romeo", "CS 2024").await;
    assert!(matches!(result, Err(StoreError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_remote_save_calculation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/love_calculations")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "first_name": "Alice",
            "second_name": "Bob",
            "percentage": 60
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"c1","first_name":"Alice","second_name":"Bob","percentage":60,
                "computed_at":"2025-02-14T09:30:00Z"}]"#,
        )
        .create_async()
        .await;

    let saved = client(&server)
        .save(&CompatibilityRecord::compute("Alice", "Bob"))
        .await
        .unwrap();

    assert_eq!(saved.id(), Some("c1"));
    assert_eq!(saved.percentage(), 60);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_remote_list_rejects_tampered_calculation() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/rest/v1/love_calculations")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"c1","first_name":"Alice","second_name":"Bob","percentage":250,
                "computed_at":"2025-02-14T09:30:00Z"}]"#,
        )
        .create_async()
        .await;

    let result = CalculationStore::list(&client(&server), 10).await;
    assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_local_store_rejects_tampered_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calcs.json");
    std::fs::write(
        &path,
        r#"[{"id":"x","first_name":"Alice","second_name":"Bob","percentage":99,"computed_at":"2025-02-14T09:30:00Z"}]"#,
    )
    .unwrap();

    let result = LocalCalculationStore::new(&path).list(10).await;
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}
