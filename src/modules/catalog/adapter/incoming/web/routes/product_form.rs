use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use futures::StreamExt;
use tracing::warn;

use crate::catalog::application::domain::entities::{
    Price, ProductName, ProductValidationError, Stock,
};
use crate::catalog::application::domain::policies::{ImageRejection, ImageUploadPolicy};
use crate::catalog::application::ports::outgoing::ImageUpload;
use crate::shared::api::ApiResponse;

const MAX_TEXT_FIELD_BYTES: usize = 16 * 1024;

/// Raw multipart fields of a product create/update request.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Typed, validated form values. Absent fields stay `None`.
#[derive(Debug, Default)]
pub struct ValidatedProductForm {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    pub fn validate(self) -> Result<ValidatedProductForm, HttpResponse> {
        fn invalid(e: ProductValidationError) -> HttpResponse {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }

        Ok(ValidatedProductForm {
            name: self.name.as_deref().map(ProductName::new).transpose().map_err(invalid)?,
            price: self.price.as_deref().map(Price::parse).transpose().map_err(invalid)?,
            stock: self.stock.as_deref().map(Stock::parse).transpose().map_err(invalid)?,
            image: self.image,
        })
    }
}

/// Reads `name`, `price`, `stock` and `image` from a multipart body.
/// Unknown fields are drained and ignored. The image is checked against
/// `policy` while it streams, so an oversized upload is never buffered
/// past the limit.
pub async fn read_product_form(
    mut payload: Multipart,
    policy: &ImageUploadPolicy,
) -> Result<ProductForm, HttpResponse> {
    let mut form = ProductForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(malformed)?;
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "name" => form.name = Some(read_text(&mut field).await?),
            "price" => form.price = Some(read_text(&mut field).await?),
            "stock" => form.stock = Some(read_text(&mut field).await?),
            "image" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_string);
                // An empty file input arrives as a part without a file name.
                if filename.as_deref().map_or(true, str::is_empty) {
                    drain(&mut field).await?;
                    continue;
                }

                let content_type = field.content_type().map(|m| m.essence_str().to_string());
                policy
                    .check_content_type(content_type.as_deref())
                    .map_err(rejected)?;

                let bytes = read_limited(&mut field, policy).await?;
                form.image = Some(ImageUpload {
                    bytes,
                    extension: policy.extension_for(filename.as_deref()),
                });
            }
            _ => drain(&mut field).await?,
        }
    }

    Ok(form)
}

async fn read_text(field: &mut Field) -> Result<String, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(ApiResponse::bad_request(
                "VALIDATION_ERROR",
                "Form field is too long",
            ));
        }
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf)
        .map_err(|_| ApiResponse::bad_request("VALIDATION_ERROR", "Form fields must be UTF-8"))
}

async fn read_limited(
    field: &mut Field,
    policy: &ImageUploadPolicy,
) -> Result<Vec<u8>, HttpResponse> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        policy
            .check_size(buf.len() + chunk.len())
            .map_err(rejected)?;
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

async fn drain(field: &mut Field) -> Result<(), HttpResponse> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(malformed)?;
    }
    Ok(())
}

fn malformed(e: impl std::fmt::Display) -> HttpResponse {
    warn!(error = %e, "Malformed multipart body");
    ApiResponse::bad_request("VALIDATION_ERROR", "Malformed multipart body")
}

fn rejected(e: ImageRejection) -> HttpResponse {
    let code = match e {
        ImageRejection::NotAnImage => "INVALID_IMAGE_TYPE",
        ImageRejection::TooLarge { .. } => "IMAGE_TOO_LARGE",
    };
    ApiResponse::bad_request(code, &e.to_string())
}
