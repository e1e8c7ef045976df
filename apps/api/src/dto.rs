use campusforge_application::{
    ApplicationRecord, InquiryRecord, InquirySummaryRecord, UserProfileRecord,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub postgres: &'static str,
}

/// API representation of a stored user profile.
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Success payload for a profile synchronization.
#[derive(Debug, Serialize)]
pub struct SyncProfileResponse {
    pub message: &'static str,
    pub user: UserProfileResponse,
}

/// Success payload for an inquiry submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryResponse {
    pub message: &'static str,
    pub order_id: String,
}

/// API representation of a full inquiry row, as staff sees it.
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    pub id: String,
    pub user_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub service_type: String,
    pub project_details: String,
    pub status: &'static str,
    pub raw_form_data: Value,
    pub created_at: DateTime<Utc>,
    pub last_updated_by: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
}

/// API representation of one entry in the caller's own inquiry history.
#[derive(Debug, Serialize)]
pub struct InquirySummaryResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub service_type: String,
    pub project_details: String,
    pub status: &'static str,
}

/// API representation of a stored job application.
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub linkedin: Option<String>,
    pub resume_data: Option<Value>,
    pub cover_letter: Option<String>,
    pub status: &'static str,
    pub submitted_data_raw: Value,
    pub created_at: DateTime<Utc>,
}

/// Success payload for an application status decision.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationStatusResponse {
    pub message: &'static str,
    pub updated_application: ApplicationResponse,
}

/// Success payload for a form-provider application intake.
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub message: &'static str,
    pub data: ApplicationResponse,
}

/// Answer payload from the AI assistant.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

impl From<UserProfileRecord> for UserProfileResponse {
    fn from(record: UserProfileRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            full_name: record.full_name,
            avatar_url: record.avatar_url,
            roles: record.roles,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<InquiryRecord> for InquiryResponse {
    fn from(record: InquiryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id,
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            customer_phone: record.customer_phone,
            service_type: record.service_type,
            project_details: record.project_details,
            status: record.status.as_str(),
            raw_form_data: record.raw_form_data,
            created_at: record.created_at,
            last_updated_by: record.last_updated_by,
            last_updated_at: record.last_updated_at,
        }
    }
}

impl From<InquirySummaryRecord> for InquirySummaryResponse {
    fn from(record: InquirySummaryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            created_at: record.created_at,
            service_type: record.service_type,
            project_details: record.project_details,
            status: record.status.as_str(),
        }
    }
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            email: record.email,
            phone: record.phone,
            position: record.position,
            linkedin: record.linkedin,
            resume_data: record
                .resume
                .map(|resume| json!({ "url": resume.url, "filename": resume.filename })),
            cover_letter: record.cover_letter,
            status: record.status.as_str(),
            submitted_data_raw: record.submitted_data_raw,
            created_at: record.created_at,
        }
    }
}
