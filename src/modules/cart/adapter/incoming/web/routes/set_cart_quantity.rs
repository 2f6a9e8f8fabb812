use actix_web::{put, web, Responder};

use super::cart_dto::{CartResponse, SetQuantityRequest};
use super::{invalid_quantity, map_cart_error, parse_path_product_id};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::cart::application::domain::entities::{coerce_quantity, QuantityError};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Set a line's quantity
///
/// Zero removes the line. Positive quantities are checked against stock.
#[utoipa::path(
    put,
    path = "/api/cart/{productId}",
    tag = "cart",
    security(("BearerAuth" = [])),
    params(("productId" = String, Path, description = "Product id")),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = inline(SuccessResponse<CartResponse>)),
        (status = 400, description = "Invalid quantity", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Line or product not found", body = ErrorResponse),
        (status = 409, description = "Not enough stock", body = ErrorResponse),
    )
)]
#[put("/api/cart/{productId}")]
pub async fn set_cart_quantity_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    req: web::Json<SetQuantityRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = match parse_path_product_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let quantity = match req.quantity.as_ref() {
        Some(value) => coerce_quantity(value),
        None => Err(QuantityError::NotAnInteger),
    };
    let quantity = match quantity {
        Ok(q) => q,
        Err(e) => return invalid_quantity(e),
    };

    match data
        .cart
        .set_quantity
        .execute(user.user_id, product_id, quantity)
        .await
    {
        Ok(lines) => ApiResponse::success(CartResponse::from(lines)),
        Err(e) => map_cart_error(e, user.user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::cart::adapter::incoming::web::routes::test_support::MockCart;
    use crate::cart::application::ports::incoming::use_cases::CartError;
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, token_provider_data};
    use actix_web::{test, App};
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    async fn call(mock: &Arc<MockCart>, id: &str, payload: serde_json::Value) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::default().with_cart(mock.use_cases()).build())
                .app_data(token_provider_data())
                .app_data(custom_json_config())
                .service(set_cart_quantity_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/cart/{id}"))
            .insert_header(bearer(Role::User))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_zero_is_passed_through() {
        let mock = MockCart::returning(Ok(vec![]));
        let id = Uuid::new_v4();

        let (status, _) = call(&mock, &id.to_string(), json!({ "quantity": 0 })).await;

        assert_eq!(status, 200);
        assert_eq!(mock.calls.lock().unwrap()[0], format!("set {id} 0"));
    }

    #[actix_web::test]
    async fn test_negative_or_missing_quantity_is_invalid() {
        let mock = MockCart::returning(Ok(vec![]));
        let id = Uuid::new_v4().to_string();

        let (status, body) = call(&mock, &id, json!({ "quantity": -1 })).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "INVALID_QUANTITY");

        let (status, _) = call(&mock, &id, json!({})).await;
        assert_eq!(status, 400);
        assert!(mock.calls.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_line_not_in_cart() {
        let mock = MockCart::returning(Err(CartError::CartItemNotFound));
        let (status, body) = call(&mock, &Uuid::new_v4().to_string(), json!({ "quantity": 2 })).await;

        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "CART_ITEM_NOT_FOUND");
    }
}
