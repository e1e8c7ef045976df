use campusforge_application::{InquiryRepository, NewInquiry};
use campusforge_core::AppError;
use campusforge_domain::{InquiryId, InquiryStatus};
use serde_json::json;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresInquiryRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres inquiry tests: {error}");
    }

    Some(pool)
}

async fn ensure_profile(pool: &PgPool, subject: &str) {
    let insert = sqlx::query(
        r#"
        INSERT INTO users (id)
        VALUES ($1)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(subject)
    .execute(pool)
    .await;

    assert!(insert.is_ok());
}

fn new_inquiry(subject: &str, details: &str) -> NewInquiry {
    NewInquiry {
        user_id: subject.to_owned(),
        customer_name: "Liam Petrov".to_owned(),
        customer_email: "liam@example.edu".to_owned(),
        customer_phone: None,
        service_type: "web-development".to_owned(),
        project_details: details.to_owned(),
        raw_form_data: json!({ "project_details": details }),
    }
}

#[tokio::test]
async fn insert_without_profile_row_reports_the_remediation_hint() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresInquiryRepository::new(pool);
    let orphan_subject = format!("missing-{}", Uuid::new_v4());

    let result = repository
        .insert(new_inquiry(orphan_subject.as_str(), "A site nobody asked for."))
        .await;

    match result {
        Err(AppError::Upstream { message, .. }) => {
            assert!(message.contains("logging out and in again"));
        }
        other => panic!("expected an upstream error with remediation hint, got {other:?}"),
    }
}

#[tokio::test]
async fn insert_then_list_for_subject_returns_newest_first() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresInquiryRepository::new(pool.clone());
    let subject = format!("subject-{}", Uuid::new_v4());
    ensure_profile(&pool, subject.as_str()).await;

    let first = repository
        .insert(new_inquiry(subject.as_str(), "Club site with a calendar."))
        .await;
    assert!(first.is_ok());
    let second = repository
        .insert(new_inquiry(subject.as_str(), "Dashboard for intramurals."))
        .await;
    assert!(second.is_ok());
    let second = second.unwrap_or_else(|_| unreachable!());

    let own = repository.list_for_subject(subject.as_str()).await;
    assert!(own.is_ok());
    let own = own.unwrap_or_else(|_| unreachable!());
    assert_eq!(own.len(), 2);
    assert_eq!(own[0].id, second);
    assert_eq!(own[0].status, InquiryStatus::New);
    assert_eq!(own[0].project_details, "Dashboard for intramurals.");
}

#[tokio::test]
async fn update_status_stamps_the_actor_and_filters_apply() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresInquiryRepository::new(pool.clone());
    let subject = format!("subject-{}", Uuid::new_v4());
    ensure_profile(&pool, subject.as_str()).await;

    let inquiry_id = repository
        .insert(new_inquiry(subject.as_str(), "Brand refresh for the radio club."))
        .await;
    assert!(inquiry_id.is_ok());
    let inquiry_id = inquiry_id.unwrap_or_else(|_| unreachable!());

    let updated = repository
        .update_status(inquiry_id, InquiryStatus::Completed, "manager-1")
        .await;
    assert!(updated.is_ok());
    let updated = updated.unwrap_or_else(|_| unreachable!());
    assert!(updated.is_some());
    let updated = updated.unwrap_or_else(|| unreachable!());
    assert_eq!(updated.status, InquiryStatus::Completed);
    assert_eq!(updated.last_updated_by.as_deref(), Some("manager-1"));
    assert!(updated.last_updated_at.is_some());

    let completed = repository.list(Some(InquiryStatus::Completed)).await;
    assert!(completed.is_ok());
    let completed = completed.unwrap_or_else(|_| unreachable!());
    assert!(completed.iter().any(|record| record.id == inquiry_id));

    let fresh = repository.list(Some(InquiryStatus::New)).await;
    assert!(fresh.is_ok());
    let fresh = fresh.unwrap_or_else(|_| unreachable!());
    assert!(fresh.iter().all(|record| record.id != inquiry_id));
}

#[tokio::test]
async fn update_status_for_unknown_inquiry_returns_none() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresInquiryRepository::new(pool);

    let updated = repository
        .update_status(InquiryId::new(), InquiryStatus::Rejected, "manager-1")
        .await;

    assert!(matches!(updated, Ok(None)));
}
