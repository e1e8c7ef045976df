//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod access;
mod record;
mod status;

pub use access::{AccessDenied, Capability, DenyReason, Role, authorize};
pub use record::{ApplicationId, InquiryId};
pub use status::{ApplicationStatus, InquiryStatus};
