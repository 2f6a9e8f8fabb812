use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::image_claims::ImageClaims;
use crate::catalog::application::ports::incoming::use_cases::{
    DeleteProductError, DeleteProductUseCase,
};
use crate::catalog::application::ports::outgoing::{
    ImageStorage, ProductQuery, ProductRepository, ProductRepositoryError,
};
use super::image_release::release_image;

pub struct DeleteProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    repository: R,
    query: Q,
    images: Arc<dyn ImageStorage>,
    claims: Arc<ImageClaims>,
}

impl<R, Q> DeleteProductService<R, Q>
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
}

#[async_trait]
impl<R, Q> DeleteProductUseCase for DeleteProductService<R, Q>
where
    R: ProductRepository,
    Q: ProductQuery,
{
    async fn execute(&self, product_id: Uuid) -> Result<Product, DeleteProductError> {
        let deleted = self
            .repository
            .delete_product(product_id)
            .await
            .map_err(|e| match e {
                ProductRepositoryError::NotFound => DeleteProductError::NotFound,
                other => DeleteProductError::RepositoryError(other.to_string()),
            })?;

        info!(product_id = %deleted.id, name = %deleted.name, "Product deleted");

        // The row is gone either way; file cleanup failures are only logged.
        if let Some(file) = deleted.image.as_deref() {
            release_image(&self.claims, &self.query, self.images.as_ref(), file).await;
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::application::service::test_doubles::{
        product, MockImageStorageMock, MockProductQueryMock, MockProductRepositoryMock,
    };
    use mockall::predicate::eq;

    fn repo_deleting(deleted: Product) -> MockProductRepositoryMock {
        let mut repo = MockProductRepositoryMock::new();
        repo.expect_delete_product()
            .times(1)
            .returning(move |_| Ok(deleted.clone()));
        repo
    }

    #[tokio::test]
    async fn test_delete_removes_unshared_image() {
        let deleted = product("Mate", 0, Some("mate.png"));
        let id = deleted.id;
        let mut query = MockProductQueryMock::new();
        query
            .expect_image_in_use()
            .with(eq("mate.png"))
            .returning(|_| Ok(false));
        let mut images = MockImageStorageMock::new();
        images
            .expect_remove()
            .with(eq("mate.png"))
            .times(1)
            .returning(|_| Ok(()));

        let service = DeleteProductService::new(
            repo_deleting(deleted),
            query,
            Arc::new(images),
            Arc::new(ImageClaims::new()),
        );
        let result = service.execute(id).await.unwrap();

        assert_eq!(result.id, id);
    }

    #[tokio::test]
    async fn test_delete_without_image_touches_no_file() {
        let deleted = product("Mate", 0, None);
        let id = deleted.id;
        let mut query = MockProductQueryMock::new();
        query.expect_image_in_use().never();
        let mut images = MockImageStorageMock::new();
        images.expect_remove().never();

        let service = DeleteProductService::new(
            repo_deleting(deleted),
            query,
            Arc::new(images),
            Arc::new(ImageClaims::new()),
        );

        assert!(service.execute(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_keeps_image_shared_with_other_product() {
        let deleted = product("Mate", 0, Some("shared.png"));
        let id = deleted.id;
        let mut query = MockProductQueryMock::new();
        query.expect_image_in_use().returning(|_| Ok(true));
        let mut images = MockImageStorageMock::new();
        images.expect_remove().never();

        let service = DeleteProductService::new(
            repo_deleting(deleted),
            query,
            Arc::new(images),
            Arc::new(ImageClaims::new()),
        );

        assert!(service.execute(id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_unknown_product_is_not_found() {
        let mut repo = MockProductRepositoryMock::new();
        repo.expect_delete_product()
            .returning(|_| Err(ProductRepositoryError::NotFound));

        let service = DeleteProductService::new(
            repo,
            MockProductQueryMock::new(),
            Arc::new(MockImageStorageMock::new()),
            Arc::new(ImageClaims::new()),
        );

        assert_eq!(
            service.execute(Uuid::new_v4()).await.unwrap_err(),
            DeleteProductError::NotFound
        );
    }

    #[tokio::test]
    async fn test_file_removal_failure_still_succeeds() {
        let deleted = product("Mate", 0, Some("mate.png"));
        let id = deleted.id;
        let mut query = MockProductQueryMock::new();
        query.expect_image_in_use().returning(|_| Ok(false));
        let mut images = MockImageStorageMock::new();
        images
            .expect_remove()
            .returning(|_| Err(crate::catalog::application::ports::outgoing::ImageStorageError::Io(
                "read-only".to_string(),
            )));

        let service = DeleteProductService::new(
            repo_deleting(deleted),
            query,
            Arc::new(images),
            Arc::new(ImageClaims::new()),
        );

        assert!(service.execute(id).await.is_ok());
    }
}
