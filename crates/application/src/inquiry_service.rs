//! Service inquiry ports and application service.
//!
//! Inquiries are the service requests visitors submit through the site
//! form. Submission keeps the raw payload as an audit snapshot next to
//! the extracted fields, and always synchronizes the caller's profile
//! first so the stored row has a valid profile reference.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use campusforge_core::{AppError, AppResult, IdentityClaim};
use campusforge_domain::{InquiryId, InquiryStatus};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::payload::{optional_text, required_text};
use crate::profile_service::ProfileService;

/// Sentinel filter value that disables status filtering on the queue.
const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Full inquiry row as staff sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryRecord {
    /// Unique inquiry identifier.
    pub id: InquiryId,
    /// Subject identifier of the submitting user.
    pub user_id: String,
    /// Contact name given on the form.
    pub customer_name: String,
    /// Contact email given on the form.
    pub customer_email: String,
    /// Contact phone, if supplied.
    pub customer_phone: Option<String>,
    /// Requested service category.
    pub service_type: String,
    /// Free-text description of the request.
    pub project_details: String,
    /// Current lifecycle status.
    pub status: InquiryStatus,
    /// Raw submission payload kept for auditing.
    pub raw_form_data: Value,
    /// When the inquiry was submitted.
    pub created_at: DateTime<Utc>,
    /// Subject of the last staff member who changed the status.
    pub last_updated_by: Option<String>,
    /// When the status last changed.
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// Reduced inquiry row returned for the caller's own history.
#[derive(Debug, Clone, PartialEq)]
pub struct InquirySummaryRecord {
    /// Unique inquiry identifier.
    pub id: InquiryId,
    /// When the inquiry was submitted.
    pub created_at: DateTime<Utc>,
    /// Requested service category.
    pub service_type: String,
    /// Free-text description of the request.
    pub project_details: String,
    /// Current lifecycle status.
    pub status: InquiryStatus,
}

/// Fields written when a new inquiry is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInquiry {
    /// Subject identifier of the submitting user.
    pub user_id: String,
    /// Contact name given on the form.
    pub customer_name: String,
    /// Contact email given on the form.
    pub customer_email: String,
    /// Contact phone, if supplied.
    pub customer_phone: Option<String>,
    /// Requested service category.
    pub service_type: String,
    /// Free-text description of the request.
    pub project_details: String,
    /// Raw submission payload kept for auditing.
    pub raw_form_data: Value,
}

/// Repository port for inquiry persistence.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Inserts a new inquiry with status `new`. Returns the assigned id.
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<InquiryId>;

    /// Lists inquiries for staff, newest first, optionally filtered by
    /// status.
    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<InquiryRecord>>;

    /// Lists the reduced history for one subject, newest first.
    async fn list_for_subject(&self, subject: &str) -> AppResult<Vec<InquirySummaryRecord>>;

    /// Sets the status and stamps who changed it. Returns the updated row
    /// or `None` when the inquiry does not exist.
    async fn update_status(
        &self,
        inquiry_id: InquiryId,
        status: InquiryStatus,
        updated_by: &str,
    ) -> AppResult<Option<InquiryRecord>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for submitting and working service inquiries.
#[derive(Clone)]
pub struct InquiryService {
    repository: Arc<dyn InquiryRepository>,
    profile_service: ProfileService,
}

impl InquiryService {
    /// Creates a new inquiry service.
    #[must_use]
    pub fn new(repository: Arc<dyn InquiryRepository>, profile_service: ProfileService) -> Self {
        Self {
            repository,
            profile_service,
        }
    }

    /// Records a new inquiry submitted by the caller.
    ///
    /// The caller's profile is synchronized first; if that upsert fails
    /// the inquiry is not written, so a stored inquiry always references
    /// an existing profile row. The raw payload is stored verbatim as the
    /// audit snapshot.
    pub async fn submit(&self, claim: &IdentityClaim, payload: Value) -> AppResult<InquiryId> {
        let customer_name = required_text(&payload, "customer_name")?;
        let customer_email = required_text(&payload, "customer_email")?;
        let service_type = required_text(&payload, "service_type")?;
        let project_details = required_text(&payload, "project_details")?;
        let customer_phone = optional_text(&payload, "customer_phone");

        self.profile_service.sync(claim).await?;

        self.repository
            .insert(NewInquiry {
                user_id: claim.subject().to_owned(),
                customer_name,
                customer_email,
                customer_phone,
                service_type,
                project_details,
                raw_form_data: payload,
            })
            .await
    }

    /// Lists the staff queue, newest first.
    ///
    /// `filter` is the raw query value: absent or `all` disables
    /// filtering, a status string narrows the queue, anything else is a
    /// validation error so typos do not read as an empty queue.
    pub async fn list_queue(&self, filter: Option<&str>) -> AppResult<Vec<InquiryRecord>> {
        let status = match filter.map(str::trim) {
            None | Some(FILTER_ALL) | Some("") => None,
            Some(value) => Some(InquiryStatus::from_str(value)?),
        };

        self.repository.list(status).await
    }

    /// Lists the caller's own inquiry history, newest first.
    pub async fn list_own(&self, subject: &str) -> AppResult<Vec<InquirySummaryRecord>> {
        self.repository.list_for_subject(subject).await
    }

    /// Moves an inquiry to a new status on behalf of a staff member.
    pub async fn update_status(
        &self,
        inquiry_id: InquiryId,
        status_value: &str,
        updated_by: &str,
    ) -> AppResult<InquiryRecord> {
        let status = InquiryStatus::from_str(status_value)?;

        self.repository
            .update_status(inquiry_id, status, updated_by)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("inquiry '{inquiry_id}' does not exist")))
    }
}
