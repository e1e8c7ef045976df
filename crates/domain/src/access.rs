use std::fmt::{Display, Formatter};
use std::str::FromStr;

use campusforge_core::{AppError, IdentityClaim};
use serde::{Deserialize, Serialize};

/// Staff roles assigned through the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff member; may read the shared inquiry queue.
    Employee,
    /// Manages the inquiry queue, including status changes.
    OrderManager,
    /// Executive role with full access, including recruiting review.
    Ceo,
}

impl Role {
    /// Returns the stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::OrderManager => "order_manager",
            Self::Ceo => "ceo",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Employee, Role::OrderManager, Role::Ceo];

        ALL
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "employee" => Ok(Self::Employee),
            "order_manager" => Ok(Self::OrderManager),
            "ceo" => Ok(Self::Ceo),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Protected actions a caller may attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Submitting a new service inquiry.
    SubmitInquiry,
    /// Listing the caller's own inquiries.
    ViewOwnInquiries,
    /// Listing every inquiry in the queue.
    ViewAllInquiries,
    /// Moving an inquiry through its status lifecycle.
    UpdateInquiryStatus,
    /// Listing and deciding job applications.
    ReviewApplications,
    /// Using the unrestricted tier of the AI assistant.
    ElevatedChatTier,
}

impl Capability {
    /// Returns the stable log value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitInquiry => "inquiry.submit",
            Self::ViewOwnInquiries => "inquiry.view_own",
            Self::ViewAllInquiries => "inquiry.view_all",
            Self::UpdateInquiryStatus => "inquiry.update_status",
            Self::ReviewApplications => "application.review",
            Self::ElevatedChatTier => "chat.elevated",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::SubmitInquiry,
            Capability::ViewOwnInquiries,
            Capability::ViewAllInquiries,
            Capability::UpdateInquiryStatus,
            Capability::ReviewApplications,
            Capability::ElevatedChatTier,
        ];

        ALL
    }

    /// Returns the roles that grant this capability. An empty slice means
    /// any authenticated claim qualifies.
    #[must_use]
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::SubmitInquiry | Self::ViewOwnInquiries => &[],
            Self::ViewAllInquiries => &[Role::Employee, Role::OrderManager, Role::Ceo],
            Self::UpdateInquiryStatus => &[Role::OrderManager, Role::Ceo],
            Self::ReviewApplications | Self::ElevatedChatTier => &[Role::Ceo],
        }
    }
}

/// Why an access check failed. Logged server-side, never surfaced to the
/// caller: every denial maps to the same unauthorized response so the
/// privilege layout stays opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The request carried no resolved claim.
    NoClaim,
    /// The claim resolved without a usable subject identifier.
    MissingSubject,
    /// The claim holds none of the roles the capability requires.
    InsufficientRole,
}

impl DenyReason {
    /// Returns the stable log value for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoClaim => "no-claim",
            Self::MissingSubject => "claim-missing-subject",
            Self::InsufficientRole => "insufficient-role",
        }
    }
}

/// A failed access check: which capability was attempted and why it was
/// refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    capability: Capability,
    reason: DenyReason,
}

impl AccessDenied {
    /// Returns the capability that was attempted.
    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Returns why the check failed.
    #[must_use]
    pub fn reason(&self) -> DenyReason {
        self.reason
    }
}

impl Display for AccessDenied {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "capability '{}' denied: {}",
            self.capability.as_str(),
            self.reason.as_str()
        )
    }
}

/// Checks whether the resolved claim may exercise the capability.
///
/// The check is ordered: a claim must exist, must carry a usable subject,
/// and must hold one of the allowed roles (unless the capability is open
/// to any authenticated caller). The first failing step decides the deny
/// reason.
pub fn authorize(
    claim: Option<&IdentityClaim>,
    capability: Capability,
) -> Result<(), AccessDenied> {
    let Some(claim) = claim else {
        return Err(AccessDenied {
            capability,
            reason: DenyReason::NoClaim,
        });
    };

    if claim.subject().trim().is_empty() {
        return Err(AccessDenied {
            capability,
            reason: DenyReason::MissingSubject,
        });
    }

    let allowed = capability.allowed_roles();
    if allowed.is_empty() || allowed.iter().any(|role| claim.has_role(role.as_str())) {
        return Ok(());
    }

    Err(AccessDenied {
        capability,
        reason: DenyReason::InsufficientRole,
    })
}
