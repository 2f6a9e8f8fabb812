use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::products::{self, ActiveModel, Column, Entity};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::outgoing::{
    CreateProductData, PatchProductData, ProductRepository, ProductRepositoryError,
};

#[derive(Clone)]
pub struct ProductRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProductRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn create_product(
        &self,
        data: CreateProductData,
    ) -> Result<Product, ProductRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            price: Set(data.price),
            stock: Set(data.stock),
            image: Set(data.image),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model_to_product(inserted))
    }

    async fn patch_product(
        &self,
        product_id: Uuid,
        data: PatchProductData,
    ) -> Result<Product, ProductRepositoryError> {
        if data.is_empty() {
            let current = Entity::find_by_id(product_id)
                .one(&*self.db)
                .await
                .map_err(map_db_err)?
                .ok_or(ProductRepositoryError::NotFound)?;
            return Ok(model_to_product(current));
        }

        let mut model = <ActiveModel as Default>::default();
        if let Some(name) = data.name {
            model.name = Set(name);
        }
        if let Some(price) = data.price {
            model.price = Set(price);
        }
        if let Some(stock) = data.stock {
            model.stock = Set(stock);
        }
        if let Some(image) = data.image {
            model.image = Set(Some(image));
        }
        // update_many bypasses before_save
        model.updated_at = Set(Utc::now().fixed_offset());

        let updated = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(product_id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_db_err)?;

        updated
            .into_iter()
            .next()
            .map(model_to_product)
            .ok_or(ProductRepositoryError::NotFound)
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<Product, ProductRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let existing = match Entity::find_by_id(product_id)
            .lock_exclusive()
            .one(&txn)
            .await
        {
            Ok(Some(model)) => model,
            Ok(None) => {
                let _ = txn.rollback().await;
                return Err(ProductRepositoryError::NotFound);
            }
            Err(e) => {
                let _ = txn.rollback().await;
                return Err(map_db_err(e));
            }
        };

        if let Err(e) = Entity::delete_by_id(product_id).exec(&txn).await {
            let _ = txn.rollback().await;
            return Err(map_db_err(e));
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(model_to_product(existing))
    }
}

pub(crate) fn model_to_product(model: products::Model) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        image: model.image,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn map_db_err(e: DbErr) -> ProductRepositoryError {
    let msg = e.to_string().to_lowercase();

    if (msg.contains("23505") || msg.contains("duplicate key") || msg.contains("unique constraint"))
        && msg.contains("name")
    {
        ProductRepositoryError::NameAlreadyExists
    } else {
        ProductRepositoryError::DatabaseError(e.to_string())
    }
}
