//! Request context resolution

use axum::{extract::Request, middleware::Next, response::Response};
use verdant_core::{AccessError, Authenticated, Profile, RequestContext};

use crate::error::ApiError;

/// Compile the caller's entitlements and attach a [`RequestContext`]
///
/// Must run after [`authenticate`](super::authenticate). If it did not, the
/// request is treated as unauthenticated.
pub async fn resolve_context(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let authenticated = request
        .extensions_mut()
        .remove::<Authenticated>()
        .ok_or(AccessError::AuthRequired)?;
    let profile = request
        .extensions_mut()
        .remove::<Profile>()
        .unwrap_or_default();

    let ctx = RequestContext::resolve(authenticated, &profile);
    tracing::trace!(
        user_id = ctx.user_id(),
        plan = %ctx.entitlements().plan(),
        mode = %ctx.entitlements().mode(),
        "resolved request context"
    );
    request.extensions_mut().insert(ctx);

    Ok(next.run(request).await)
}
