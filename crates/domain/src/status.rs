use std::str::FromStr;

use campusforge_core::AppError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a service inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    /// Just submitted, nobody has picked it up yet.
    New,
    /// A staff member is working the inquiry.
    InProgress,
    /// Work finished and the requester was notified.
    Completed,
    /// Declined without completing the requested work.
    Rejected,
}

impl InquiryStatus {
    /// Returns the stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }

    /// Returns all known inquiry statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[InquiryStatus] = &[
            InquiryStatus::New,
            InquiryStatus::InProgress,
            InquiryStatus::Completed,
            InquiryStatus::Rejected,
        ];

        ALL
    }
}

impl FromStr for InquiryStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "invalid inquiry status '{value}', expected one of: new, in-progress, completed, rejected"
            ))),
        }
    }
}

/// Review state of a job application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Waiting for an executive decision.
    Pending,
    /// Accepted for the next hiring step.
    Approved,
    /// Turned down.
    Denied,
}

impl ApplicationStatus {
    /// Returns the stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    /// Returns all known application statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ApplicationStatus] = &[
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Denied,
        ];

        ALL
    }
}

impl FromStr for ApplicationStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "denied" => Ok(Self::Denied),
            _ => Err(AppError::Validation(format!(
                "invalid application status '{value}', expected one of: approved, denied, pending"
            ))),
        }
    }
}
