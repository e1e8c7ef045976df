use std::str::FromStr;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use campusforge_application::{InquiryRecord, InquiryRepository, InquirySummaryRecord, NewInquiry};
use campusforge_core::{AppError, AppResult};
use campusforge_domain::{InquiryId, InquiryStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// PostgreSQL-backed repository for service inquiry rows.
#[derive(Clone)]
pub struct PostgresInquiryRepository {
    pool: PgPool,
}

impl PostgresInquiryRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct InquiryRow {
    id: Uuid,
    user_id: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    service_type: String,
    project_details: String,
    status: String,
    raw_form_data: Json<Value>,
    created_at: DateTime<Utc>,
    last_updated_by: Option<String>,
    last_updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<InquiryRow> for InquiryRecord {
    type Error = AppError;

    fn try_from(row: InquiryRow) -> Result<Self, Self::Error> {
        let status = stored_status(row.id, row.status.as_str())?;

        Ok(Self {
            id: InquiryId::from_uuid(row.id),
            user_id: row.user_id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            service_type: row.service_type,
            project_details: row.project_details,
            status,
            raw_form_data: row.raw_form_data.0,
            created_at: row.created_at,
            last_updated_by: row.last_updated_by,
            last_updated_at: row.last_updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct InquirySummaryRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    service_type: String,
    project_details: String,
    status: String,
}

impl TryFrom<InquirySummaryRow> for InquirySummaryRecord {
    type Error = AppError;

    fn try_from(row: InquirySummaryRow) -> Result<Self, Self::Error> {
        let status = stored_status(row.id, row.status.as_str())?;

        Ok(Self {
            id: InquiryId::from_uuid(row.id),
            created_at: row.created_at,
            service_type: row.service_type,
            project_details: row.project_details,
            status,
        })
    }
}

#[async_trait]
impl InquiryRepository for PostgresInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<InquiryId> {
        let inquiry_id = InquiryId::new();

        sqlx::query(
            r#"
            INSERT INTO service_orders (
                id, user_id, customer_name, customer_email, customer_phone,
                service_type, project_details, status, raw_form_data
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(inquiry_id.as_uuid())
        .bind(inquiry.user_id)
        .bind(inquiry.customer_name)
        .bind(inquiry.customer_email)
        .bind(inquiry.customer_phone)
        .bind(inquiry.service_type)
        .bind(inquiry.project_details)
        .bind(InquiryStatus::New.as_str())
        .bind(Json(inquiry.raw_form_data))
        .execute(&self.pool)
        .await
        .map_err(missing_profile_or_upstream)?;

        Ok(inquiry_id)
    }

    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<InquiryRecord>> {
        let rows = sqlx::query_as::<_, InquiryRow>(
            r#"
            SELECT id, user_id, customer_name, customer_email, customer_phone,
                service_type, project_details, status, raw_form_data,
                created_at, last_updated_by, last_updated_at
            FROM service_orders
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.map(|value| value.as_str().to_owned()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list inquiries: {error}")))?;

        rows.into_iter().map(InquiryRecord::try_from).collect()
    }

    async fn list_for_subject(&self, subject: &str) -> AppResult<Vec<InquirySummaryRecord>> {
        let rows = sqlx::query_as::<_, InquirySummaryRow>(
            r#"
            SELECT id, created_at, service_type, project_details, status
            FROM service_orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list inquiries for subject: {error}"))
        })?;

        rows.into_iter().map(InquirySummaryRecord::try_from).collect()
    }

    async fn update_status(
        &self,
        inquiry_id: InquiryId,
        status: InquiryStatus,
        updated_by: &str,
    ) -> AppResult<Option<InquiryRecord>> {
        let row = sqlx::query_as::<_, InquiryRow>(
            r#"
            UPDATE service_orders
            SET status = $2, last_updated_by = $3, last_updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, customer_name, customer_email, customer_phone,
                service_type, project_details, status, raw_form_data,
                created_at, last_updated_by, last_updated_at
            "#,
        )
        .bind(inquiry_id.as_uuid())
        .bind(status.as_str())
        .bind(updated_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update inquiry status: {error}"))
        })?;

        row.map(InquiryRecord::try_from).transpose()
    }
}

fn stored_status(inquiry_id: Uuid, value: &str) -> AppResult<InquiryStatus> {
    InquiryStatus::from_str(value).map_err(|_| {
        AppError::Internal(format!(
            "inquiry '{inquiry_id}' carries unknown stored status '{value}'"
        ))
    })
}

fn missing_profile_or_upstream(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23503")
        && database_error.constraint() == Some("service_orders_user_id_fkey")
    {
        error!(%error, "inquiry insert references a profile row that does not exist");
        return AppError::upstream(
            "order creation failed due to a user profile inconsistency; \
             please try logging out and in again, or contact support",
            None,
        );
    }

    error!(%error, "inquiry insert failed");
    AppError::upstream("failed to record inquiry", sqlstate(&error))
}

fn sqlstate(error: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(database_error) = error {
        database_error.code().map(|code| code.into_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
