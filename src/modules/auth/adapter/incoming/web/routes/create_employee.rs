use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use tracing::info;

use super::register_user::{
    map_register_error, parse_create_user_request, CreateUserRequest, RegisterUserResponse,
};

/// Create an employee account
///
/// Admin only. The new account always gets the `employee` role.
#[utoipa::path(
    post,
    path = "/api/auth/users/employee",
    tag = "users",
    request_body = CreateUserRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 201, description = "Employee created", body = inline(SuccessResponse<RegisterUserResponse>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 409, description = "Email or full name taken", body = ErrorResponse),
    )
)]
#[post("/api/auth/users/employee")]
pub async fn create_employee_handler(
    admin: AdminUser,
    req: web::Json<CreateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match parse_create_user_request(req.into_inner()) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let email = request.email().to_string();

    match data.create_employee_use_case.execute(request).await {
        Ok(user) => {
            info!(
                admin_id = %admin.user.user_id,
                employee_id = %user.id,
                "Employee account created"
            );
            ApiResponse::created(RegisterUserResponse {
                message: "Employee created successfully".to_string(),
                user: user.into(),
            })
        }
        Err(e) => map_register_error(e, &email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::auth::application::ports::outgoing::UserResult;
    use crate::auth::application::use_cases::create_employee::ICreateEmployeeUseCase;
    use crate::auth::application::use_cases::register_user::{
        RegisterUserError, RegisterUserRequest,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, token_provider_data};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct MockCreateEmployee {
        result: Result<UserResult, RegisterUserError>,
    }

    #[async_trait]
    impl ICreateEmployeeUseCase for MockCreateEmployee {
        async fn execute(&self, _: RegisterUserRequest) -> Result<UserResult, RegisterUserError> {
            self.result.clone()
        }
    }

    fn employee() -> MockCreateEmployee {
        MockCreateEmployee {
            result: Ok(UserResult {
                id: Uuid::new_v4(),
                full_name: "Luis Paz".to_string(),
                email: "luis@example.com".to_string(),
                role: Role::Employee,
            }),
        }
    }

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "fullName": "Luis Paz",
            "email": "luis@example.com",
            "password": "secret",
            "confirmPassword": "secret"
        })
    }

    async fn call(
        uc: MockCreateEmployee,
        caller: Option<Role>,
    ) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_create_employee(uc)
            .build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(token_provider_data())
                .service(create_employee_handler),
        )
        .await;

        let mut req = test::TestRequest::post()
            .uri("/api/auth/users/employee")
            .set_json(payload());
        if let Some(role) = caller {
            req = req.insert_header(bearer(role));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_admin_creates_employee() {
        let (status, body) = call(employee(), Some(Role::Admin)).await;

        assert_eq!(status, 201);
        assert_eq!(body["data"]["message"], "Employee created successfully");
        assert_eq!(body["data"]["user"]["role"], "employee");
    }

    #[actix_web::test]
    async fn test_employee_cannot_create_employee() {
        let (status, body) = call(employee(), Some(Role::Employee)).await;

        assert_eq!(status, 403);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn test_anonymous_is_unauthorized() {
        let (status, body) = call(employee(), None).await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "MISSING_AUTH_HEADER");
    }

    #[actix_web::test]
    async fn test_taken_email_conflicts() {
        let (status, body) = call(
            MockCreateEmployee {
                result: Err(RegisterUserError::EmailAlreadyExists),
            },
            Some(Role::Admin),
        )
        .await;

        assert_eq!(status, 409);
        assert_eq!(body["error"]["code"], "EMAIL_ALREADY_EXISTS");
    }
}
