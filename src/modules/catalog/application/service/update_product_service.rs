use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::image_claims::ImageClaims;
use crate::catalog::application::ports::incoming::use_cases::{
    UpdateProductCommand, UpdateProductError, UpdateProductUseCase,
};
use crate::catalog::application::ports::outgoing::{
    ImageStorage, ImageStorageError, PatchProductData, ProductQuery, ProductRepository,
    ProductRepositoryError,
};
use super::image_release::release_image;

pub struct UpdateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    repository: R,
    query: Q,
    images: Arc<dyn ImageStorage>,
    claims: Arc<ImageClaims>,
}

impl<R, Q> UpdateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    pub fn new(
        repository: R,
        query: Q,
        images: Arc<dyn ImageStorage>,
        claims: Arc<ImageClaims>,
    ) -> Self {
        Self {
            repository,
            query,
            images,
            claims,
        }
    }

    async fn ensure_name_free(&self, product_id: Uuid, name: &str) -> Result<(), UpdateProductError> {
        let holder = self
            .query
            .find_by_name(name)
            .await
            .map_err(|e| UpdateProductError::RepositoryError(e.to_string()))?;

        match holder {
            Some(other) if other.id != product_id => Err(UpdateProductError::NameAlreadyExists),
            _ => Ok(()),
        }
    }

    async fn release(&self, file: &str) {
        release_image(&self.claims, &self.query, self.images.as_ref(), file).await;
    }
}

#[async_trait]
impl<R, Q> UpdateProductUseCase for UpdateProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    async fn execute(
        &self,
        product_id: Uuid,
        command: UpdateProductCommand,
    ) -> Result<Product, UpdateProductError> {
        let current = self
            .query
            .find_by_id(product_id)
            .await
            .map_err(|e| UpdateProductError::RepositoryError(e.to_string()))?
            .ok_or(UpdateProductError::NotFound)?;

        if let Some(name) = &command.name {
            if name.as_str() != current.name {
                self.ensure_name_free(product_id, name.as_str()).await?;
            }
        }

        let claim = self.claims.upload().await;
        let stored = match &command.image {
            Some(upload) => Some(self.images.store(upload).await.map_err(|e| match e {
                ImageStorageError::Duplicate { existing } => {
                    UpdateProductError::DuplicateImage { existing }
                }
                ImageStorageError::Io(msg) => UpdateProductError::ImageStorageError(msg),
            })?),
            None => None,
        };

        let patch = PatchProductData {
            name: command.name.map(|n| n.into_inner()),
            price: command.price.map(|p| p.value()),
            stock: command.stock.map(|s| s.value()),
            image: stored.as_ref().map(|s| s.filename().to_string()),
        };

        let updated = match self.repository.patch_product(product_id, patch).await {
            Ok(product) => product,
            Err(e) => {
                drop(claim);
                if let Some(fresh) = stored.as_ref().filter(|s| s.is_written()) {
                    self.release(fresh.filename()).await;
                }
                return Err(match e {
                    ProductRepositoryError::NotFound => UpdateProductError::NotFound,
                    ProductRepositoryError::NameAlreadyExists => {
                        UpdateProductError::NameAlreadyExists
                    }
                    ProductRepositoryError::DatabaseError(msg) => {
                        UpdateProductError::RepositoryError(msg)
                    }
                });
            }
        };

        drop(claim);

        // The previous file goes only once no product references it.
        if let (Some(old), Some(new)) = (current.image.as_deref(), stored.as_ref()) {
            if old != new.filename() {
                self.release(old).await;
            }
        }

        info!(product_id = %updated.id, "Product updated");
        Ok(updated)
    }
}
