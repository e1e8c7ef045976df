use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use campusforge_application::{ProfileRepository, ProfileUpsert, UserProfileRecord};
use campusforge_core::{AppError, AppResult};
use chrono::{DateTime, Utc};

/// PostgreSQL-backed repository for user profile rows.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: String,
    email: Option<String>,
    full_name: Option<String>,
    avatar_url: Option<String>,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfileRecord {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            roles: row.roles,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn upsert(&self, profile: ProfileUpsert) -> AppResult<UserProfileRecord> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO users (id, email, full_name, avatar_url, roles)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                full_name = EXCLUDED.full_name,
                avatar_url = EXCLUDED.avatar_url,
                roles = EXCLUDED.roles,
                updated_at = now()
            RETURNING id, email, full_name, avatar_url, roles, created_at, updated_at
            "#,
        )
        .bind(profile.subject)
        .bind(profile.email)
        .bind(profile.full_name)
        .bind(profile.avatar_url)
        .bind(profile.roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            error!(%error, "profile upsert failed");
            AppError::upstream("failed to synchronize user profile", sqlstate(&error))
        })?;

        Ok(row.into())
    }
}

fn sqlstate(error: &sqlx::Error) -> Option<String> {
    if let sqlx::Error::Database(database_error) = error {
        database_error.code().map(|code| code.into_owned())
    } else {
        None
    }
}
