use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::{TokenProvider, TokenSubject};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";
pub const TEST_ISSUER: &str = "stock-shop";

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: TEST_SECRET.to_string(),
        issuer: TEST_ISSUER.to_string(),
        access_token_expiry: 3600,
    })
}

/// Token provider as registered by `main`, for `App::app_data`.
pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(test_jwt_service());
    web::Data::new(provider)
}

/// `Authorization` header for a specific identity.
pub fn bearer_for(user_id: Uuid, email: &str, role: Role) -> (&'static str, String) {
    let token = test_jwt_service()
        .generate_access_token(&TokenSubject {
            user_id,
            email: email.to_string(),
            role,
        })
        .expect("test token");
    ("Authorization", format!("Bearer {token}"))
}

/// `Authorization` header for a fresh user with `role`.
pub fn bearer(role: Role) -> (&'static str, String) {
    bearer_for(Uuid::new_v4(), "tester@example.com", role)
}
