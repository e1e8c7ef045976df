use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth;

/// Resolves the caller identity for every request.
///
/// Never rejects; anonymous callers pass through with an empty identity
/// so open routes keep working and gated handlers decide for themselves.
pub async fn resolve_identity(mut request: Request, next: Next) -> Response {
    let identity = auth::resolve_verified_identity(request.headers());
    request.extensions_mut().insert(identity);

    next.run(request).await
}
