use std::str::FromStr;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use campusforge_application::{
    ApplicationRecord, ApplicationRepository, NewApplication, ResumeReference,
};
use campusforge_core::{AppError, AppResult};
use campusforge_domain::{ApplicationId, ApplicationStatus};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

/// PostgreSQL-backed repository for job application rows.
#[derive(Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    position: String,
    linkedin: Option<String>,
    resume_data: Option<Json<Value>>,
    cover_letter: Option<String>,
    status: String,
    submitted_data_raw: Json<Value>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for ApplicationRecord {
    type Error = AppError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = ApplicationStatus::from_str(row.status.as_str()).map_err(|_| {
            AppError::Internal(format!(
                "application '{}' carries unknown stored status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: ApplicationId::from_uuid(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            linkedin: row.linkedin,
            resume: row.resume_data.and_then(|data| resume_reference(&data.0)),
            cover_letter: row.cover_letter,
            status,
            submitted_data_raw: row.submitted_data_raw.0,
            created_at: row.created_at,
        })
    }
}

fn resume_reference(data: &Value) -> Option<ResumeReference> {
    let url = data.get("url").and_then(Value::as_str)?.to_owned();

    match data.get("filename").and_then(Value::as_str) {
        Some(filename) => Some(ResumeReference {
            url,
            filename: filename.to_owned(),
        }),
        None => Some(ResumeReference::from_url(url)),
    }
}

fn resume_data(resume: Option<&ResumeReference>) -> Option<Json<Value>> {
    resume.map(|reference| {
        Json(json!({
            "url": reference.url,
            "filename": reference.filename,
        }))
    })
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn insert(&self, application: NewApplication) -> AppResult<ApplicationRecord> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            INSERT INTO applications (
                id, name, email, phone, position, linkedin,
                resume_data, cover_letter, status, submitted_data_raw
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, email, phone, position, linkedin,
                resume_data, cover_letter, status, submitted_data_raw, created_at
            "#,
        )
        .bind(ApplicationId::new().as_uuid())
        .bind(application.name)
        .bind(application.email)
        .bind(application.phone)
        .bind(application.position)
        .bind(application.linkedin)
        .bind(resume_data(application.resume.as_ref()))
        .bind(application.cover_letter)
        .bind(ApplicationStatus::Pending.as_str())
        .bind(Json(application.submitted_data_raw))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            error!(%error, "application insert failed");
            AppError::upstream("failed to save application", sqlstate(&error))
        })?;

        row.try_into()
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> AppResult<Vec<ApplicationRecord>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, name, email, phone, position, linkedin,
                resume_data, cover_letter, status, submitted_data_raw, created_at
            FROM applications
            WHERE status = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list applications: {error}")))?;

        rows.into_iter().map(ApplicationRecord::try_from).collect()
    }

    async fn update_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<Option<ApplicationRecord>> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            r#"
            UPDATE applications
            SET status = $2
            WHERE id = $1
            RETURNING id, name, email, phone, position, linkedin,
                resume_data, cover_letter, status, submitted_data_raw, created_at
            "#,
        )
        .bind(application_id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update application status: {error}"))
        })?;

        row.map(ApplicationRecord::try_from).transpose()
    }
}

fn sqlstate(error: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(database_error) = error {
        database_error.code().map(|code| code.into_owned())
    } else {
        None
    }
}
