use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::UserResult;
use crate::auth::application::use_cases::register_user::{
    RegisterRequestError, RegisterUserError, RegisterUserRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for registration and employee creation
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Full name, unique across accounts
    #[schema(example = "Ana Torres")]
    pub full_name: String,

    /// Email address, unique across accounts
    #[schema(example = "ana@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,

    /// Must equal `password`
    #[schema(example = "SecurePass123!")]
    pub confirm_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterUserResponse {
    #[schema(example = "User created successfully")]
    pub message: String,

    pub user: RegisteredUser,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,

    #[schema(example = "Ana Torres")]
    pub full_name: String,

    #[schema(example = "ana@example.com")]
    pub email: String,

    pub role: Role,
}

impl From<UserResult> for RegisteredUser {
    fn from(user: UserResult) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

pub(super) fn parse_create_user_request(
    dto: CreateUserRequest,
) -> Result<RegisterUserRequest, HttpResponse> {
    RegisterUserRequest::new(dto.full_name, dto.email, dto.password, dto.confirm_password)
        .map_err(|e| {
            warn!(error = %e, "Invalid registration input");
            match e {
                RegisterRequestError::PasswordMismatch => {
                    ApiResponse::bad_request("PASSWORD_MISMATCH", &e.to_string())
                }
                other => ApiResponse::bad_request("VALIDATION_ERROR", &other.to_string()),
            }
        })
}

pub(super) fn map_register_error(err: RegisterUserError, email: &str) -> HttpResponse {
    match err {
        RegisterUserError::EmailAlreadyExists => {
            warn!(email = %email, "Email already registered");
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", "Email is already in use")
        }
        RegisterUserError::FullNameAlreadyExists => {
            warn!(email = %email, "Full name already registered");
            ApiResponse::conflict("FULL_NAME_ALREADY_EXISTS", "Full name is already in use")
        }
        other => {
            error!(email = %email, error = %other, "User creation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new account
///
/// The very first account becomes `admin`; every later one is `user`.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<RegisterUserResponse>)),
        (status = 400, description = "Invalid input or password mismatch", body = ErrorResponse),
        (status = 409, description = "Email or full name taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match parse_create_user_request(req.into_inner()) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let email = request.email().to_string();

    match data.register_user_use_case.execute(request).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, role = %user.role, "User registered");
            let message = match user.role {
                Role::Admin => "Admin created successfully",
                _ => "User created successfully",
            };
            ApiResponse::created(RegisterUserResponse {
                message: message.to_string(),
                user: user.into(),
            })
        }
        Err(e) => map_register_error(e, &email),
    }
}
