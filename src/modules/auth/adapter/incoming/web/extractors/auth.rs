use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    marker::PhantomData,
    sync::Arc,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, RoleSet};
use crate::auth::application::ports::outgoing::token_provider::{TokenClaims, TokenProvider};
use crate::shared::api::ApiResponse;

/// Caller identity decoded from a valid bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

#[derive(Debug, PartialEq)]
enum AuthFailure {
    MissingHeader,
    MalformedHeader,
    InvalidToken,
    Misconfigured,
}

impl AuthFailure {
    fn into_error(self) -> ActixError {
        let response = match self {
            AuthFailure::MissingHeader => ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing authorization header",
            ),
            AuthFailure::MalformedHeader => ApiResponse::unauthorized(
                "MALFORMED_AUTH_HEADER",
                "Authorization header must be 'Bearer <token>'",
            ),
            AuthFailure::InvalidToken => {
                ApiResponse::unauthorized("INVALID_TOKEN", "Invalid or expired token")
            }
            AuthFailure::Misconfigured => ApiResponse::internal_error(),
        };
        create_api_error(response)
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

/// `<scheme> <token>`, exactly two parts, scheme `Bearer` in any case.
fn extract_bearer_token(req: &HttpRequest) -> Result<&str, AuthFailure> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(AuthFailure::MissingHeader)?
        .to_str()
        .map_err(|_| AuthFailure::MalformedHeader)?;

    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => Ok(token),
        _ => Err(AuthFailure::MalformedHeader),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthFailure> {
    let token = extract_bearer_token(req)?;

    let token_provider = req
        .app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
        .ok_or_else(|| {
            tracing::error!("TokenProvider is not registered as app data");
            AuthFailure::Misconfigured
        })?;

    token_provider
        .verify_token(token)
        .map(AuthenticatedUser::from)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AuthFailure::InvalidToken
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(AuthFailure::into_error))
    }
}

/// Identity when a valid bearer token is present, `None` otherwise.
/// Never rejects the request.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalUser(authenticate(req).ok())))
    }
}

/// Static set of roles a guarded handler accepts.
pub trait RolePolicy {
    const ALLOWED: RoleSet;
}

#[derive(Debug, Clone, Copy)]
pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const ALLOWED: RoleSet = RoleSet::of(&[Role::Admin]);
}

#[derive(Debug, Clone, Copy)]
pub struct StaffOnly;

impl RolePolicy for StaffOnly {
    const ALLOWED: RoleSet = RoleSet::of(&[Role::Admin, Role::Employee]);
}

/// Authenticated caller whose role is in `P::ALLOWED`; 403 otherwise.
#[derive(Debug, Clone)]
pub struct RequireRole<P: RolePolicy> {
    pub user: AuthenticatedUser,
    _policy: PhantomData<P>,
}

pub type AdminUser = RequireRole<AdminOnly>;
pub type StaffUser = RequireRole<StaffOnly>;

impl<P: RolePolicy> FromRequest for RequireRole<P> {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = match authenticate(req) {
            Ok(user) => user,
            Err(failure) => return ready(Err(failure.into_error())),
        };

        if !P::ALLOWED.permits(user.role) {
            tracing::warn!(user_id = %user.user_id, role = %user.role, "Role not permitted");
            return ready(Err(create_api_error(ApiResponse::forbidden(
                "FORBIDDEN",
                "You do not have permission to perform this action",
            ))));
        }

        ready(Ok(RequireRole {
            user,
            _policy: PhantomData,
        }))
    }
}
