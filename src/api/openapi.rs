use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    CreateUserRequest, LoginRequestDto, LoginResponse, LoginUserInfo, RegisterUserResponse,
    RegisteredUser, UserListItem, UserListResponse, VerifiedTokenUser, VerifyTokenResponse,
};
use crate::auth::application::domain::entities::Role;
use crate::cart::adapter::incoming::web::routes::{
    AddToCartRequest, CartLineDto, CartResponse, SetQuantityRequest,
};
use crate::catalog::adapter::incoming::web::routes::{
    ProductListResponse, ProductResponse, SingleProductResponse,
};
use crate::checkout::adapter::incoming::web::routes::DegradedCheckoutResponse;
use crate::shared::api::MessageBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Shop API",
        version = "1.0.0",
        description = "Product catalog, per-user carts and checkout with CSV tickets"
    ),
    paths(
        // Auth
        crate::auth::adapter::incoming::web::routes::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_token_handler,
        crate::auth::adapter::incoming::web::routes::create_employee_handler,
        crate::auth::adapter::incoming::web::routes::list_users_handler,

        // Products
        crate::catalog::adapter::incoming::web::routes::get_products_handler,
        crate::catalog::adapter::incoming::web::routes::get_single_product_handler,
        crate::catalog::adapter::incoming::web::routes::create_product_handler,
        crate::catalog::adapter::incoming::web::routes::update_product_handler,
        crate::catalog::adapter::incoming::web::routes::delete_product_handler,

        // Cart
        crate::cart::adapter::incoming::web::routes::get_cart_handler,
        crate::cart::adapter::incoming::web::routes::add_to_cart_handler,
        crate::cart::adapter::incoming::web::routes::set_cart_quantity_handler,
        crate::cart::adapter::incoming::web::routes::remove_from_cart_handler,
        crate::checkout::adapter::incoming::web::routes::checkout_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,
            MessageBody,
            Role,

            CreateUserRequest,
            RegisterUserResponse,
            RegisteredUser,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            VerifyTokenResponse,
            VerifiedTokenUser,
            UserListResponse,
            UserListItem,

            ProductResponse,
            ProductListResponse,
            SingleProductResponse,

            AddToCartRequest,
            SetQuantityRequest,
            CartLineDto,
            CartResponse,
            DegradedCheckoutResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and token checks"),
        (name = "users", description = "Account management (admin)"),
        (name = "products", description = "Product catalog"),
        (name = "cart", description = "Shopping cart and checkout"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
