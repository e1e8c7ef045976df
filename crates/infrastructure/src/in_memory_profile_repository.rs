use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use campusforge_application::{ProfileRepository, ProfileUpsert, UserProfileRecord};
use campusforge_core::AppResult;

/// In-memory profile repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    rows: RwLock<HashMap<String, UserProfileRecord>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(&self, profile: ProfileUpsert) -> AppResult<UserProfileRecord> {
        let mut rows = self.rows.write().await;
        let now = Utc::now();
        let created_at = rows
            .get(profile.subject.as_str())
            .map_or(now, |existing| existing.created_at);

        let record = UserProfileRecord {
            id: profile.subject.clone(),
            email: profile.email,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            roles: profile.roles,
            created_at,
            updated_at: now,
        };
        rows.insert(profile.subject, record.clone());

        Ok(record)
    }
}
