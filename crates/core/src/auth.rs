use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller identity resolved from a claims document the identity gateway
/// already verified.
///
/// Resolution is pure: no network calls, no clock reads. A document that
/// cannot produce a usable subject resolves to no claim at all, so
/// downstream checks fail closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    subject: String,
    email: Option<String>,
    full_name: Option<String>,
    avatar_url: Option<String>,
    roles: Vec<String>,
}

impl IdentityClaim {
    /// Creates a claim from already-resolved parts.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        email: Option<String>,
        full_name: Option<String>,
        avatar_url: Option<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            email,
            full_name,
            avatar_url,
            roles,
        }
    }

    /// Resolves a claim from a decoded identity-provider claims document.
    ///
    /// The subject is taken from `sub`, falling back to `id`; a blank or
    /// missing value in both positions yields `None`. Roles come from
    /// `app_metadata.roles`; anything that is not a non-blank string is
    /// skipped and duplicates are dropped.
    #[must_use]
    pub fn from_claims_document(document: &Value) -> Option<Self> {
        let subject = text_field(document, "sub").or_else(|| text_field(document, "id"))?;
        let email = text_field(document, "email");
        let full_name = document
            .get("user_metadata")
            .and_then(|metadata| text_field(metadata, "full_name"));
        let avatar_url = document
            .get("user_metadata")
            .and_then(|metadata| text_field(metadata, "avatar_url"));
        let roles = role_list(document);

        Some(Self {
            subject,
            email,
            full_name,
            avatar_url,
            roles,
        })
    }

    /// Returns the stable subject identifier from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the provider supplied one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name, if the provider supplied one.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the avatar URL, if the provider supplied one.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the provider-assigned role strings.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.roles.as_slice()
    }

    /// Returns whether the claim carries the given role string.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }
}

fn text_field(document: &Value, name: &str) -> Option<String> {
    let value = document.get(name)?.as_str()?.trim();
    if value.is_empty() {
        return None;
    }

    Some(value.to_owned())
}

fn role_list(document: &Value) -> Vec<String> {
    let Some(entries) = document
        .get("app_metadata")
        .and_then(|metadata| metadata.get("roles"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut roles: Vec<String> = Vec::new();
    for entry in entries {
        let Some(role) = entry.as_str() else {
            continue;
        };
        let role = role.trim();
        if role.is_empty() || roles.iter().any(|existing| existing == role) {
            continue;
        }
        roles.push(role.to_owned());
    }

    roles
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::IdentityClaim;

    #[test]
    fn resolves_subject_from_sub() {
        let document = json!({ "sub": "subject-1", "email": "ada@example.edu" });

        let claim = IdentityClaim::from_claims_document(&document);

        assert!(claim.is_some());
        let claim = claim.unwrap_or_else(|| unreachable!());
        assert_eq!(claim.subject(), "subject-1");
        assert_eq!(claim.email(), Some("ada@example.edu"));
    }

    #[test]
    fn falls_back_to_id_when_sub_is_absent() {
        let document = json!({ "id": "subject-2" });

        let claim = IdentityClaim::from_claims_document(&document);

        assert_eq!(
            claim.map(|value| value.subject().to_owned()),
            Some("subject-2".to_owned())
        );
    }

    #[test]
    fn blank_sub_falls_through_to_id() {
        let document = json!({ "sub": "   ", "id": "subject-3" });

        let claim = IdentityClaim::from_claims_document(&document);

        assert_eq!(
            claim.map(|value| value.subject().to_owned()),
            Some("subject-3".to_owned())
        );
    }

    #[test]
    fn document_without_usable_subject_yields_no_claim() {
        assert!(IdentityClaim::from_claims_document(&json!({})).is_none());
        assert!(IdentityClaim::from_claims_document(&json!({ "sub": "" })).is_none());
        assert!(IdentityClaim::from_claims_document(&json!({ "sub": " ", "id": "" })).is_none());
        assert!(IdentityClaim::from_claims_document(&json!({ "sub": 42 })).is_none());
    }

    #[test]
    fn missing_role_metadata_yields_empty_role_set() {
        let document = json!({ "sub": "subject-4" });

        let claim = IdentityClaim::from_claims_document(&document);

        assert_eq!(claim.map(|value| value.roles().len()), Some(0));
    }

    #[test]
    fn non_array_roles_yield_empty_role_set() {
        let document = json!({
            "sub": "subject-5",
            "app_metadata": { "roles": "ceo" },
        });

        let claim = IdentityClaim::from_claims_document(&document);

        assert_eq!(claim.map(|value| value.roles().len()), Some(0));
    }

    #[test]
    fn role_entries_are_trimmed_deduplicated_and_filtered() {
        let document = json!({
            "sub": "subject-6",
            "app_metadata": { "roles": ["employee", " employee", 7, "", "ceo"] },
        });

        let claim = IdentityClaim::from_claims_document(&document);

        assert!(claim.is_some());
        let claim = claim.unwrap_or_else(|| unreachable!());
        assert_eq!(claim.roles(), ["employee".to_owned(), "ceo".to_owned()]);
        assert!(claim.has_role("ceo"));
        assert!(!claim.has_role("order_manager"));
    }

    #[test]
    fn profile_metadata_is_optional() {
        let document = json!({
            "sub": "subject-7",
            "user_metadata": { "full_name": "Ada Lovelace" },
        });

        let claim = IdentityClaim::from_claims_document(&document);

        assert!(claim.is_some());
        let claim = claim.unwrap_or_else(|| unreachable!());
        assert_eq!(claim.full_name(), Some("Ada Lovelace"));
        assert_eq!(claim.avatar_url(), None);
        assert_eq!(claim.email(), None);
    }
}
