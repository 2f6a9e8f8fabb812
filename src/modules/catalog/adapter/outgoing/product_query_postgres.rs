use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::product_repository_postgres::model_to_product;
use super::sea_orm_entity::products::{Column, Entity};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::outgoing::{ProductQuery, ProductQueryError};

#[derive(Clone, Debug)]
pub struct ProductQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProductQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn db_err(e: sea_orm::DbErr) -> ProductQueryError {
    ProductQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductQuery for ProductQueryPostgres {
    async fn list_products(&self) -> Result<Vec<Product>, ProductQueryError> {
        let models = Entity::find()
            .order_by_asc(Column::Name)
            .all(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(model_to_product).collect())
    }

    async fn find_by_id(&self, product_id: Uuid) -> Result<Option<Product>, ProductQueryError> {
        let model = Entity::find_by_id(product_id)
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_product))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductQueryError> {
        let model = Entity::find()
            .filter(Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(model_to_product))
    }

    async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<HashSet<Uuid>, ProductQueryError> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let models = Entity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.id).collect())
    }

    async fn image_in_use(&self, filename: &str) -> Result<bool, ProductQueryError> {
        let count = Entity::find()
            .filter(Column::Image.eq(filename))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::adapter::outgoing::product_repository_postgres::tests::product_model;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};

    fn query(db: MockDatabase) -> ProductQueryPostgres {
        ProductQueryPostgres::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn test_list_products() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            product_model("Azucar", 1, None),
            product_model("Cafe", 2, Some("cafe.png")),
        ]]);

        let products = query(db).list_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].image.as_deref(), Some("cafe.png"));
    }

    #[tokio::test]
    async fn test_find_by_name_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::catalog::adapter::outgoing::sea_orm_entity::products::Model>::new()]);

        assert!(query(db).find_by_name("Nada").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_existing_ids_skips_query_for_empty_input() {
        // No results appended: any query would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        assert!(query(db).find_existing_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_existing_ids_returns_present_subset() {
        let kept = product_model("Cafe", 2, None);
        let kept_id = kept.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![kept]]);

        let ids = query(db)
            .find_existing_ids(&[kept_id, Uuid::new_v4()])
            .await
            .unwrap();

        assert_eq!(ids, HashSet::from([kept_id]));
    }

    #[tokio::test]
    async fn test_image_in_use_counts_references() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![
            btreemap! { "num_items" => Value::BigInt(Some(1)) },
        ]]);

        assert!(query(db).image_in_use("mate.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_is_mapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("down".to_string())]);

        let err = query(db).list_products().await.unwrap_err();
        assert!(matches!(err, ProductQueryError::DatabaseError(_)));
    }
}
