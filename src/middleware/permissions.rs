//! Authorization policies.
//!
//! Each policy is a two-phase predicate: [`Policy::allows`] runs before the
//! target row is known (router middleware), [`Policy::allows_object`] runs
//! in the handler once the row is loaded. Keeping the phases separate
//! preserves the fall-back-to-read-only semantics for object-scoped
//! resources.
//!
//! Denials map to 401 for anonymous callers and 403 for identified ones.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Read-only HTTP methods.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

pub trait Policy {
    /// Coarse phase: decided from the actor and method alone.
    fn allows(&self, actor: Option<&AuthUser>, method: &Method) -> bool;

    /// Fine phase: decided once the target resource's author is known.
    /// Defaults to the coarse decision for policies without object scope.
    fn allows_object(&self, actor: Option<&AuthUser>, method: &Method, _author_id: Uuid) -> bool {
        self.allows(actor, method)
    }
}

/// Access only for authenticated admins (role admin or superuser).
pub struct IsAdmin;

impl Policy for IsAdmin {
    fn allows(&self, actor: Option<&AuthUser>, _method: &Method) -> bool {
        actor.map(|a| a.is_admin()).unwrap_or(false)
    }
}

/// Anyone may read; only admins may mutate.
pub struct IsAdminOrReadOnly;

impl Policy for IsAdminOrReadOnly {
    fn allows(&self, actor: Option<&AuthUser>, method: &Method) -> bool {
        is_safe_method(method) || actor.map(|a| a.is_admin()).unwrap_or(false)
    }
}

/// Anyone may read; the author, moderators and admins may mutate.
pub struct IsAuthorOrAdminOrModeratorOrReadOnly;

impl Policy for IsAuthorOrAdminOrModeratorOrReadOnly {
    fn allows(&self, actor: Option<&AuthUser>, method: &Method) -> bool {
        actor.is_some() || is_safe_method(method)
    }

    fn allows_object(&self, actor: Option<&AuthUser>, method: &Method, author_id: Uuid) -> bool {
        match actor {
            Some(a) => {
                a.user_id().map(|id| id == author_id).unwrap_or(false)
                    || a.is_admin()
                    || a.is_moderator()
                    || is_safe_method(method)
            }
            None => is_safe_method(method),
        }
    }
}

fn deny(actor: Option<&AuthUser>) -> AppError {
    match actor {
        Some(_) => AppError::forbidden("You do not have permission to perform this action"),
        None => AppError::unauthorized("Authentication required"),
    }
}

pub fn authorize<P: Policy>(
    policy: &P,
    actor: Option<&AuthUser>,
    method: &Method,
) -> Result<(), AppError> {
    if policy.allows(actor, method) {
        Ok(())
    } else {
        Err(deny(actor))
    }
}

pub fn authorize_object<P: Policy>(
    policy: &P,
    actor: Option<&AuthUser>,
    method: &Method,
    author_id: Uuid,
) -> Result<(), AppError> {
    if policy.allows_object(actor, method, author_id) {
        Ok(())
    } else {
        Err(deny(actor))
    }
}

async fn run_coarse_phase<P: Policy>(
    policy: &P,
    state: AppState,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let method = parts.method.clone();

    let actor = OptionalAuthUser::from_request_parts(&mut parts, &state).await?.0;
    authorize(policy, actor.as_ref(), &method)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Route-layer middleware enforcing [`IsAdmin`].
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match run_coarse_phase(&IsAdmin, state, req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Route-layer middleware enforcing [`IsAdminOrReadOnly`].
pub async fn admin_or_read_only(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match run_coarse_phase(&IsAdminOrReadOnly, state, req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Route-layer middleware enforcing the coarse phase of
/// [`IsAuthorOrAdminOrModeratorOrReadOnly`]. The object phase runs in the
/// handlers after the target row is fetched.
pub async fn authenticated_or_read_only(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match run_coarse_phase(&IsAuthorOrAdminOrModeratorOrReadOnly, state, req, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use crate::modules::users::model::Role;

    fn actor(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            username: "test".to_string(),
            role,
            is_superuser: false,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn anonymous_denial_is_unauthorized() {
        let err = authorize(&IsAdmin, None, &Method::GET).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn identified_denial_is_forbidden() {
        let user = actor(Role::User);
        let err = authorize(&IsAdmin, Some(&user), &Method::GET).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn safe_methods_recognized() {
        assert!(is_safe_method(&Method::GET));
        assert!(is_safe_method(&Method::HEAD));
        assert!(is_safe_method(&Method::OPTIONS));
        assert!(!is_safe_method(&Method::POST));
        assert!(!is_safe_method(&Method::PATCH));
        assert!(!is_safe_method(&Method::DELETE));
    }
}
