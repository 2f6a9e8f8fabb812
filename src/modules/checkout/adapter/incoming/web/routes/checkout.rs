use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::checkout::application::domain::PurchaseViolation;
use crate::checkout::application::ports::incoming::use_cases::{Buyer, CheckoutError};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Body returned when stock was committed but no ticket could be built.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DegradedCheckoutResponse {
    pub receipt_generated: bool,
    pub message: String,
}

/// Buy the cart
///
/// Purchases every line of the caller's cart in one transaction and
/// returns the CSV ticket as an attachment. The cart is emptied on success.
#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    tag = "cart",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "CSV ticket, or a JSON body when the purchase committed without one",
            content(
                (String = "text/csv"),
                (DegradedCheckoutResponse = "application/json"),
            )
        ),
        (status = 400, description = "Empty cart or invalid quantity", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Products no longer available", body = ErrorResponse),
        (status = 409, description = "Not enough stock", body = ErrorResponse),
    )
)]
#[post("/api/cart/checkout")]
pub async fn checkout_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    let buyer = Buyer {
        user_id: user.user_id,
        email: Some(user.email).filter(|e| !e.is_empty()),
    };

    match data.checkout.execute(buyer).await {
        Ok(outcome) => match outcome.ticket {
            Some(ticket) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(ticket.filename)],
                })
                .body(ticket.content),
            None => ApiResponse::success(DegradedCheckoutResponse {
                receipt_generated: false,
                message: "Purchase completed, but the ticket could not be generated".to_string(),
            }),
        },
        Err(CheckoutError::CartEmpty) => ApiResponse::bad_request("CART_EMPTY", "Cart is empty"),
        Err(CheckoutError::Rejected(violation)) => {
            let message = violation.to_string();
            match violation {
                PurchaseViolation::Unavailable(_) => {
                    ApiResponse::not_found("PRODUCT_UNAVAILABLE", &message)
                }
                PurchaseViolation::InvalidQuantity { .. } => {
                    ApiResponse::bad_request("INVALID_QUANTITY", &message)
                }
                PurchaseViolation::InsufficientStock { .. } => {
                    ApiResponse::conflict("INSUFFICIENT_STOCK", &message)
                }
            }
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Checkout failed");
            ApiResponse::internal_error()
        }
    }
}
