use axum::http::HeaderMap;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use campusforge_core::{AppError, IdentityClaim};
use campusforge_domain::{Capability, authorize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Request header carrying the gateway-verified claims document.
pub const VERIFIED_CLAIMS_HEADER: &str = "x-verified-claims";

/// Caller identity resolved once per request.
///
/// The identity gateway verified the bearer credential before the request
/// reached this process; all that is left here is decoding the forwarded
/// claims document. Anonymous callers carry `None`, and routes that need
/// more than that gate per handler.
#[derive(Debug, Clone, Default)]
pub struct VerifiedIdentity(Option<IdentityClaim>);

impl VerifiedIdentity {
    /// Wraps an already-resolved claim, mainly for tests.
    #[must_use]
    pub fn from_claim(claim: Option<IdentityClaim>) -> Self {
        Self(claim)
    }

    /// Returns the resolved claim, if the caller presented one.
    #[must_use]
    pub fn claim(&self) -> Option<&IdentityClaim> {
        self.0.as_ref()
    }
}

/// Decodes the gateway claims header into a caller identity.
///
/// Fails closed: a missing header, undecodable content, or a document
/// without a usable subject all resolve to anonymous.
pub fn resolve_verified_identity(headers: &HeaderMap) -> VerifiedIdentity {
    let Some(raw) = headers.get(VERIFIED_CLAIMS_HEADER) else {
        return VerifiedIdentity(None);
    };

    let Ok(encoded) = raw.to_str() else {
        debug!("claims header is not visible ASCII; treating caller as anonymous");
        return VerifiedIdentity(None);
    };

    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        debug!("claims header is not valid base64; treating caller as anonymous");
        return VerifiedIdentity(None);
    };

    let Ok(document) = serde_json::from_slice::<Value>(&decoded) else {
        debug!("claims header is not valid JSON; treating caller as anonymous");
        return VerifiedIdentity(None);
    };

    VerifiedIdentity(IdentityClaim::from_claims_document(&document))
}

/// Gates a handler on one capability, yielding the caller's claim.
///
/// The deny reason is logged and deliberately not surfaced: every denial
/// maps to the same unauthorized response.
pub fn require_capability<'identity>(
    identity: &'identity VerifiedIdentity,
    capability: Capability,
) -> Result<&'identity IdentityClaim, ApiError> {
    let claim = identity.claim();
    match authorize(claim, capability) {
        Ok(()) => claim.ok_or_else(unauthorized),
        Err(denied) => {
            warn!(
                capability = capability.as_str(),
                reason = denied.reason().as_str(),
                "capability denied"
            );
            Err(unauthorized())
        }
    }
}

/// Requires any authenticated caller, without a capability check.
pub fn require_claim(identity: &VerifiedIdentity) -> Result<&IdentityClaim, ApiError> {
    identity.claim().ok_or_else(|| {
        warn!("request denied: no verified claim");
        unauthorized()
    })
}

fn unauthorized() -> ApiError {
    AppError::Unauthorized("authentication required".to_owned()).into()
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use campusforge_core::IdentityClaim;
    use campusforge_domain::Capability;
    use serde_json::json;

    use super::{
        VERIFIED_CLAIMS_HEADER, VerifiedIdentity, require_capability, require_claim,
        resolve_verified_identity,
    };

    fn headers_with_claims(document: &serde_json::Value) -> HeaderMap {
        let encoded = STANDARD.encode(
            serde_json::to_vec(document).unwrap_or_else(|_| unreachable!()),
        );
        let mut headers = HeaderMap::new();
        headers.insert(
            VERIFIED_CLAIMS_HEADER,
            HeaderValue::from_str(&encoded).unwrap_or_else(|_| unreachable!()),
        );

        headers
    }

    fn claim_with_roles(roles: &[&str]) -> IdentityClaim {
        let document = json!({
            "sub": "subject-1",
            "email": "person@example.edu",
            "app_metadata": { "roles": roles },
        });

        IdentityClaim::from_claims_document(&document).unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn resolves_a_claim_from_the_gateway_header() {
        let headers = headers_with_claims(&json!({
            "sub": "auth0|9f2",
            "email": "visitor@example.edu",
            "app_metadata": { "roles": ["employee"] },
        }));

        let identity = resolve_verified_identity(&headers);
        let claim = identity.claim();

        assert_eq!(claim.map(IdentityClaim::subject), Some("auth0|9f2"));
        assert_eq!(claim.and_then(IdentityClaim::email), Some("visitor@example.edu"));
    }

    #[test]
    fn missing_header_resolves_to_anonymous() {
        let identity = resolve_verified_identity(&HeaderMap::new());

        assert!(identity.claim().is_none());
    }

    #[test]
    fn garbage_header_resolves_to_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            VERIFIED_CLAIMS_HEADER,
            HeaderValue::from_static("!!!not-base64!!!"),
        );

        assert!(resolve_verified_identity(&headers).claim().is_none());

        let mut headers = HeaderMap::new();
        headers.insert(
            VERIFIED_CLAIMS_HEADER,
            HeaderValue::from_str(&STANDARD.encode(b"{not json"))
                .unwrap_or_else(|_| unreachable!()),
        );

        assert!(resolve_verified_identity(&headers).claim().is_none());
    }

    #[test]
    fn document_without_subject_resolves_to_anonymous() {
        let headers = headers_with_claims(&json!({
            "email": "visitor@example.edu",
        }));

        assert!(resolve_verified_identity(&headers).claim().is_none());
    }

    #[test]
    fn require_capability_passes_an_allowed_claim_through() {
        let identity = VerifiedIdentity::from_claim(Some(claim_with_roles(&["order_manager"])));

        let claim = require_capability(&identity, Capability::UpdateInquiryStatus);

        assert_eq!(claim.ok().map(IdentityClaim::subject), Some("subject-1"));
    }

    #[test]
    fn require_capability_rejects_anonymous_and_underprivileged_callers() {
        let anonymous = VerifiedIdentity::from_claim(None);
        assert!(require_capability(&anonymous, Capability::SubmitInquiry).is_err());

        let employee = VerifiedIdentity::from_claim(Some(claim_with_roles(&["employee"])));
        assert!(require_capability(&employee, Capability::ReviewApplications).is_err());
    }

    #[test]
    fn require_claim_accepts_any_authenticated_caller() {
        let identity = VerifiedIdentity::from_claim(Some(claim_with_roles(&[])));
        assert!(require_claim(&identity).is_ok());

        let anonymous = VerifiedIdentity::from_claim(None);
        assert!(require_claim(&anonymous).is_err());
    }
}
