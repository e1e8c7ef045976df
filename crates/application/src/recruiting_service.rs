//! Job application ports and application service.
//!
//! Applications arrive from the hosted career form, which posts
//! server-to-server without a caller identity. Intake therefore validates
//! shape only; reviewing and deciding applications is gated upstream to
//! the executive role.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use campusforge_core::{AppError, AppResult};
use campusforge_domain::{ApplicationId, ApplicationStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::payload::{optional_text, required_text};

/// Filename recorded for resume links; the form only transmits a URL.
const RESUME_FILENAME: &str = "resume_file";

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Structured reference to an uploaded resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeReference {
    /// Where the hosted form stored the file.
    pub url: String,
    /// Filename recorded alongside the link.
    pub filename: String,
}

impl ResumeReference {
    /// Builds a reference from the URL the form transmitted.
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: RESUME_FILENAME.to_owned(),
        }
    }
}

/// Stored job application row.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRecord {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// Candidate name.
    pub name: String,
    /// Candidate email.
    pub email: String,
    /// Candidate phone, if supplied.
    pub phone: Option<String>,
    /// Position applied for.
    pub position: String,
    /// LinkedIn profile URL, if supplied.
    pub linkedin: Option<String>,
    /// Resume reference, if the form transmitted one.
    pub resume: Option<ResumeReference>,
    /// Cover letter text, if supplied.
    pub cover_letter: Option<String>,
    /// Current review status.
    pub status: ApplicationStatus,
    /// Raw form payload kept for auditing.
    pub submitted_data_raw: Value,
    /// When the application was received.
    pub created_at: DateTime<Utc>,
}

/// Fields written when a new application is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    /// Candidate name.
    pub name: String,
    /// Candidate email.
    pub email: String,
    /// Candidate phone, if supplied.
    pub phone: Option<String>,
    /// Position applied for.
    pub position: String,
    /// LinkedIn profile URL, if supplied.
    pub linkedin: Option<String>,
    /// Resume reference, if the form transmitted one.
    pub resume: Option<ResumeReference>,
    /// Cover letter text, if supplied.
    pub cover_letter: Option<String>,
    /// Raw form payload kept for auditing.
    pub submitted_data_raw: Value,
}

/// Repository port for application persistence.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts a new application with status `pending`. Returns the row
    /// as stored.
    async fn insert(&self, application: NewApplication) -> AppResult<ApplicationRecord>;

    /// Lists applications in one status, oldest first.
    async fn list_by_status(&self, status: ApplicationStatus)
    -> AppResult<Vec<ApplicationRecord>>;

    /// Sets the review status. Returns the updated row or `None` when the
    /// application does not exist.
    async fn update_status(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<Option<ApplicationRecord>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for the recruiting pipeline.
#[derive(Clone)]
pub struct RecruitingService {
    repository: Arc<dyn ApplicationRepository>,
}

impl RecruitingService {
    /// Creates a new recruiting service.
    #[must_use]
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { repository }
    }

    /// Records an application posted by the hosted form.
    ///
    /// Accepts either the bare form-field object or the form provider's
    /// submission envelope (`{"payload": {"data": {...}}}`); the form
    /// fields themselves are what gets validated and stored.
    pub async fn intake(&self, payload: Value) -> AppResult<ApplicationRecord> {
        let data = payload
            .get("payload")
            .and_then(|envelope| envelope.get("data"))
            .unwrap_or(&payload);

        let name = required_text(data, "name")?;
        let email = required_text(data, "email")?;
        let position = required_text(data, "position")?;
        let phone = optional_text(data, "phone");
        let linkedin = optional_text(data, "linkedin");
        let resume = optional_text(data, "resume").map(ResumeReference::from_url);
        let cover_letter = optional_text(data, "cover-letter");

        self.repository
            .insert(NewApplication {
                name,
                email,
                phone,
                position,
                linkedin,
                resume,
                cover_letter,
                submitted_data_raw: data.clone(),
            })
            .await
    }

    /// Lists applications still waiting for a decision, oldest first.
    pub async fn list_pending(&self) -> AppResult<Vec<ApplicationRecord>> {
        self.repository
            .list_by_status(ApplicationStatus::Pending)
            .await
    }

    /// Records an executive decision on an application.
    pub async fn update_status(
        &self,
        application_id: ApplicationId,
        status_value: &str,
    ) -> AppResult<ApplicationRecord> {
        let status = ApplicationStatus::from_str(status_value)?;

        self.repository
            .update_status(application_id, status)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("application '{application_id}' does not exist"))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use campusforge_core::{AppError, AppResult};
    use campusforge_domain::{ApplicationId, ApplicationStatus};
    use chrono::Utc;
    use serde_json::json;
    use tokio::sync::Mutex;

    use super::{
        ApplicationRecord, ApplicationRepository, NewApplication, RecruitingService,
    };

    #[derive(Default)]
    struct FakeApplicationRepository {
        applications: Mutex<Vec<ApplicationRecord>>,
    }

    #[async_trait]
    impl ApplicationRepository for FakeApplicationRepository {
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
            self.applications.lock().await.push(record.clone());
            Ok(record)
        }

        async fn list_by_status(
            &self,
            status: ApplicationStatus,
        ) -> AppResult<Vec<ApplicationRecord>> {
            Ok(self
                .applications
                .lock()
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
            let mut applications = self.applications.lock().await;
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

    fn form_fields() -> serde_json::Value {
        json!({
            "name": "Sana Idrissi",
            "email": "sana@example.edu",
            "phone": "+1 555 0188",
            "position": "Backend Developer",
            "linkedin": "https://linkedin.com/in/sana-idrissi",
            "resume": "https://uploads.example.edu/sana-resume.pdf",
            "cover-letter": "I build reliable services.",
        })
    }

    #[tokio::test]
    async fn intake_stores_pending_application_with_resume_reference() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository.clone());

        let record = service.intake(form_fields()).await;

        assert!(record.is_ok());
        let record = record.unwrap_or_else(|_| unreachable!());
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert_eq!(record.cover_letter.as_deref(), Some("I build reliable services."));
        let resume = record.resume.unwrap_or_else(|| unreachable!());
        assert_eq!(resume.url, "https://uploads.example.edu/sana-resume.pdf");
        assert_eq!(resume.filename, "resume_file");
        assert_eq!(repository.applications.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn intake_unwraps_the_form_provider_envelope() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository.clone());

        let record = service
            .intake(json!({ "payload": { "data": form_fields() } }))
            .await;

        assert!(record.is_ok());
        let record = record.unwrap_or_else(|_| unreachable!());
        assert_eq!(record.name, "Sana Idrissi");
        assert_eq!(record.submitted_data_raw, form_fields());
    }

    #[tokio::test]
    async fn intake_without_position_is_rejected_and_nothing_is_stored() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository.clone());

        let mut payload = form_fields();
        let removed = payload
            .as_object_mut()
            .and_then(|fields| fields.remove("position"));
        assert!(removed.is_some());

        let result = service.intake(payload).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repository.applications.lock().await.len(), 0);
    }

    #[tokio::test]
    async fn intake_treats_optional_fields_as_absent_when_blank() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository);

        let record = service
            .intake(json!({
                "name": "Teo Aalto",
                "email": "teo@example.edu",
                "position": "Designer",
                "resume": "",
            }))
            .await;

        assert!(record.is_ok());
        let record = record.unwrap_or_else(|_| unreachable!());
        assert_eq!(record.resume, None);
        assert_eq!(record.phone, None);
        assert_eq!(record.linkedin, None);
    }

    #[tokio::test]
    async fn pending_list_excludes_decided_applications() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository);

        let first = service.intake(form_fields()).await;
        assert!(first.is_ok());
        let first = first.unwrap_or_else(|_| unreachable!());

        let second = service
            .intake(json!({
                "name": "Rae Okafor",
                "email": "rae@example.edu",
                "position": "Data Analyst",
            }))
            .await;
        assert!(second.is_ok());

        let decided = service.update_status(first.id, "approved").await;
        assert!(decided.is_ok());

        let pending = service.list_pending().await;
        assert!(pending.is_ok());
        let pending = pending.unwrap_or_else(|_| unreachable!());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Rae Okafor");
    }

    #[tokio::test]
    async fn update_status_accepts_mixed_case_values() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository);

        let record = service.intake(form_fields()).await;
        assert!(record.is_ok());
        let record = record.unwrap_or_else(|_| unreachable!());

        let updated = service.update_status(record.id, "Denied").await;

        assert!(updated.is_ok());
        let updated = updated.unwrap_or_else(|_| unreachable!());
        assert_eq!(updated.status, ApplicationStatus::Denied);
    }

    #[tokio::test]
    async fn update_status_rejects_unknown_values() {
        let repository = Arc::new(FakeApplicationRepository::default());
        let service = RecruitingService::new(repository.clone());

        let record = service.intake(form_fields()).await;
        assert!(record.is_ok());
        let record = record.unwrap_or_else(|_| unreachable!());

        let result = service.update_status(record.id, "waitlisted").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        let applications = repository.applications.lock().await;
        assert_eq!(applications[0].status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn update_status_for_missing_application_is_not_found() {
        let service = RecruitingService::new(Arc::new(FakeApplicationRepository::default()));

        let result = service.update_status(ApplicationId::new(), "approved").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
