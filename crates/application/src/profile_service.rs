//! User profile synchronization ports and application service.
//!
//! The identity provider owns accounts; this service mirrors the verified
//! claim into the local `users` row so inquiry records always have a
//! profile to reference. Synchronization is an atomic upsert keyed by the
//! subject identifier, safe to repeat on every login.

use std::sync::Arc;

use async_trait::async_trait;
use campusforge_core::{AppResult, IdentityClaim};
use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Stored user profile row.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfileRecord {
    /// Subject identifier from the identity provider, used as the row key.
    pub id: String,
    /// Email address mirrored from the claim, if present.
    pub email: Option<String>,
    /// Display name mirrored from the claim, if present.
    pub full_name: Option<String>,
    /// Avatar URL mirrored from the claim, if present.
    pub avatar_url: Option<String>,
    /// Role strings mirrored from the claim.
    pub roles: Vec<String>,
    /// When the profile row was first created.
    pub created_at: DateTime<Utc>,
    /// When the profile row was last synchronized.
    pub updated_at: DateTime<Utc>,
}

/// Profile fields written by one synchronization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpsert {
    /// Subject identifier the row is keyed on.
    pub subject: String,
    /// Email address to mirror.
    pub email: Option<String>,
    /// Display name to mirror.
    pub full_name: Option<String>,
    /// Avatar URL to mirror.
    pub avatar_url: Option<String>,
    /// Role strings to mirror.
    pub roles: Vec<String>,
}

/// Repository port for profile persistence.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts the profile row or updates it in place, atomically, keyed
    /// on the subject identifier. Returns the row as stored.
    async fn upsert(&self, profile: ProfileUpsert) -> AppResult<UserProfileRecord>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service mirroring identity claims into stored profiles.
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    /// Creates a new profile service.
    #[must_use]
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Mirrors the claim into the stored profile and returns the row.
    ///
    /// Runs on explicit synchronization requests and before any write
    /// that references the profile row, so repeated calls must converge
    /// on the same row rather than conflict.
    pub async fn sync(&self, claim: &IdentityClaim) -> AppResult<UserProfileRecord> {
        self.repository
            .upsert(ProfileUpsert {
                subject: claim.subject().to_owned(),
                email: claim.email().map(str::to_owned),
                full_name: claim.full_name().map(str::to_owned),
                avatar_url: claim.avatar_url().map(str::to_owned),
                roles: claim.roles().to_vec(),
            })
            .await
    }
}
