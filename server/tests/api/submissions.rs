use chrono::Utc;

use reqwest::StatusCode;

use serde_json::{json, Value};

use sqlx::PgPool;

use uuid::Uuid;

use formapp::model::Submission;

use crate::helpers::{count_submissions, valid_payload, TestApp};

#[sqlx::test(migrations = "../migrations")]
async fn create_returns_created_with_defaults(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .submission_create(&valid_payload())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("weekly", body["frequency"]);
    assert_eq!(false, body["termsAccepted"]);
    assert!(body["phone"].is_null());
    assert!(body["comments"].is_null());
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());

    assert_eq!(1, count_submissions(&pool).await);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_stamps_submission_time(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;
    let before = Utc::now();

    let submission: Submission = app
        .submission_create(&valid_payload())
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to decode body");

    assert!(submission.submitted_at.timestamp_micros() >= before.timestamp_micros());

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_stores_trimmed_fields_and_interests_as_given(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let created: Submission = app
        .submission_create(&json!({
            "firstName": "  Ada ",
            "lastName": "Lovelace ",
            "email": "ada@example.com",
            "phone": " 555-0100 ",
            "interests": ["technology", "sports"],
            "subscription": "premium",
            "frequency": "monthly",
            "comments": " Hello ",
            "termsAccepted": true,
        }))
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to decode body");

    let stored: Submission = app
        .submission_fetch(&created.id.to_string())
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to decode body");

    assert_eq!(created, stored);
    assert_eq!("Ada", stored.first_name);
    assert_eq!("Lovelace", stored.last_name);
    assert_eq!("ada@example.com", stored.email);
    assert_eq!(Some("555-0100".to_string()), stored.phone);
    assert_eq!(json!(["technology", "sports"]), stored.interests.0);
    assert_eq!("monthly", stored.frequency);
    assert_eq!(Some("Hello".to_string()), stored.comments);
    assert!(stored.terms_accepted);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_coerces_non_boolean_terms_to_false(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut payload = valid_payload();
    payload["termsAccepted"] = json!("true");

    let submission: Submission = app
        .submission_create(&payload)
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to decode body");

    assert!(!submission.terms_accepted);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_accepts_non_string_optional_fields(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let mut payload = valid_payload();
    payload["phone"] = json!(5551234);
    payload["comments"] = json!(true);

    let res = app
        .submission_create(&payload)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let submission: Submission = res.json().await.expect("Failed to decode body");
    assert_eq!(Some("5551234".to_string()), submission.phone);
    assert_eq!(Some("true".to_string()), submission.comments);

    assert_eq!(1, count_submissions(&pool).await);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_returns_bad_request_for_missing_fields(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for field in ["firstName", "lastName", "email", "interests", "subscription"] {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove(field);

        let res = app
            .submission_create(&payload)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when {} was missing",
            field
        );

        let body: Value = res.json().await.expect("Failed to decode body");
        assert_eq!("Required fields are missing", body["error"]);
        assert_eq!(5, body["required"].as_array().unwrap().len());
    }

    assert_eq!(0, count_submissions(&pool).await);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn create_returns_bad_request_for_invalid_email(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let test_cases = [
        ("missing @", "someone.example.com"),
        ("missing dot after @", "someone@example"),
        ("inner whitespace", "some one@example.com"),
        ("surrounding whitespace", " someone@example.com "),
    ];

    for (desc, email) in test_cases {
        let mut payload = valid_payload();
        payload["email"] = json!(email);

        let res = app
            .submission_create(&payload)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when email had {}",
            desc
        );

        let body: Value = res.json().await.expect("Failed to decode body");
        assert_eq!("Invalid email format", body["error"]);
    }

    assert_eq!(0, count_submissions(&pool).await);

    Ok(())
}

#[tokio::test]
async fn create_returns_bad_request_for_malformed_json() {
    let app = TestApp::spawn_without_database().await;

    let res = app
        .submission_create_raw("{\"firstName\": ")
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Invalid JSON format", body["error"]);
}

#[tokio::test]
async fn create_validates_before_touching_database() {
    let app = TestApp::spawn_without_database().await;

    let res = app
        .submission_create(&json!({ "firstName": "A" }))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
}

#[tokio::test]
async fn create_reports_storage_errors() {
    let app = TestApp::spawn_without_database().await;

    let res = app
        .submission_create(&valid_payload())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Failed to create submission", body["error"]);
    assert!(body["message"].is_string());
}

#[sqlx::test(migrations = "../migrations")]
async fn fetch_returns_not_found_for_unknown_ids(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let res = app
            .submission_fetch(&id)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::NOT_FOUND, res.status());

        let body: Value = res.json().await.expect("Failed to decode body");
        assert_eq!("Submission not found", body["error"]);
    }

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn delete_removes_submission(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let created: Submission = app
        .submission_create(&valid_payload())
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to decode body");
    let id = created.id.to_string();

    let res = app
        .submission_delete(&id)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Submission deleted successfully", body["message"]);

    let res = app
        .submission_fetch(&id)
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());
    assert_eq!(0, count_submissions(&pool).await);

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn delete_returns_not_found_for_unknown_id(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .submission_delete(&Uuid::new_v4().to_string())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::NOT_FOUND, res.status());

    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
async fn list_returns_newest_first(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for name in ["first", "second", "third"] {
        let mut payload = valid_payload();
        payload["firstName"] = json!(name);

        let res = app
            .submission_create(&payload)
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::CREATED, res.status());
    }

    let res = app.submission_list().await.expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());

    let submissions: Vec<Submission> = res.json().await.expect("Failed to decode body");
    let names: Vec<_> = submissions.iter().map(|s| s.first_name.as_str()).collect();
    assert_eq!(vec!["third", "second", "first"], names);

    Ok(())
}

#[tokio::test]
async fn list_reports_storage_errors() {
    let app = TestApp::spawn_without_database().await;

    let res = app.submission_list().await.expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Failed to fetch submissions", body["error"]);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn fetch_reports_storage_errors() {
    let app = TestApp::spawn_without_database().await;

    let res = app
        .submission_fetch(&Uuid::new_v4().to_string())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Failed to fetch submission", body["error"]);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn delete_reports_storage_errors() {
    let app = TestApp::spawn_without_database().await;

    let res = app
        .submission_delete(&Uuid::new_v4().to_string())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert_eq!("Failed to delete submission", body["error"]);
    assert!(body["message"].is_string());
}
