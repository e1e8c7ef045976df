use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use campusforge_application::{ApplicationRecord, ApplicationRepository, NewApplication};
use campusforge_core::AppResult;
use campusforge_domain::{ApplicationId, ApplicationStatus};

/// In-memory application repository implementation.
///
/// Rows are held in submission order, which matches the oldest-first
/// contract of the persistent store.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<Vec<ApplicationRecord>>,
}

impl InMemoryApplicationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            applications: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn insert(&self, application: NewApplication) -> AppResult<ApplicationRecord> {
        let record = ApplicationRecord {
            id: ApplicationId::new(),
            name: application.name,
            email: application.email,
            phone: application.phone,
            position: application.position,
            linkedin: application.linkedin,
            resume: application.resume,
            cover_letter: application.cover_letter,
            status: ApplicationStatus::Pending,
            submitted_data_raw: application.submitted_data_raw,
            created_at: Utc::now(),
        };
        self.applications.write().await.push(record.clone());

        Ok(record)
    }

    async fn list_by_status(
        &self,
        status: ApplicationStatus,
    ) -> AppResult<Vec<ApplicationRecord>> {
        Ok(self
            .applications
            .read()
            .await
            .iter()
            .filter(|record| record.status == status)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<Option<ApplicationRecord>> {
        let mut applications = self.applications.write().await;
        let Some(record) = applications
            .iter_mut()
            .find(|record| record.id == application_id)
        else {
            return Ok(None);
        };

        record.status = status;

        Ok(Some(record.clone()))
    }
}
