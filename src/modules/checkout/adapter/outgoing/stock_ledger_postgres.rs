use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::cart::application::domain::entities::CartLine;
use crate::catalog::adapter::outgoing::product_repository_postgres::model_to_product;
use crate::catalog::adapter::outgoing::sea_orm_entity::products::{Column, Entity};
use crate::checkout::application::domain::{plan_purchase, PurchaseLine, PurchaseViolation};
use crate::checkout::application::ports::outgoing::{StockLedger, StockLedgerError};

/// Product stock in Postgres.
///
/// Rows are locked `FOR UPDATE` in id order so concurrent purchases over
/// overlapping products queue instead of deadlocking.
#[derive(Clone)]
pub struct StockLedgerPostgres {
    db: Arc<DatabaseConnection>,
}

impl StockLedgerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn apply(
        txn: &DatabaseTransaction,
        lines: &[CartLine],
    ) -> Result<Vec<PurchaseLine>, StockLedgerError> {
        let ids: Vec<_> = lines.iter().map(|l| l.product_id).collect();

        let rows = Entity::find()
            .filter(Column::Id.is_in(ids))
            .order_by_asc(Column::Id)
            .lock_exclusive()
            .all(txn)
            .await
            .map_err(db_err)?;

        let products: HashMap<_, _> = rows
            .into_iter()
            .map(model_to_product)
            .map(|p| (p.id, p))
            .collect();

        let plan = plan_purchase(lines, &products)?;
        let now = Utc::now().fixed_offset();

        for line in &plan {
            let quantity = i32::try_from(line.quantity).map_err(|_| insufficient(line))?;

            let result = Entity::update_many()
                .col_expr(Column::Stock, Expr::col(Column::Stock).sub(quantity))
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(Column::Id.eq(line.product_id))
                .filter(Column::Stock.gte(quantity))
                .exec(txn)
                .await
                .map_err(db_err)?;

            if result.rows_affected != 1 {
                warn!(product_id = %line.product_id, "Guarded stock decrement matched no row");
                return Err(insufficient(line));
            }
        }

        Ok(plan)
    }
}

#[async_trait]
impl StockLedger for StockLedgerPostgres {
    async fn commit_purchase(
        &self,
        lines: &[CartLine],
    ) -> Result<Vec<PurchaseLine>, StockLedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        match Self::apply(&txn, lines).await {
            Ok(plan) => {
                txn.commit().await.map_err(db_err)?;
                Ok(plan)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}

fn insufficient(line: &PurchaseLine) -> StockLedgerError {
    StockLedgerError::Rejected(PurchaseViolation::InsufficientStock {
        product_name: line.name.clone(),
        available: line.stock,
        requested: line.quantity,
    })
}

fn db_err(e: DbErr) -> StockLedgerError {
    StockLedgerError::DatabaseError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::adapter::outgoing::product_repository_postgres::tests::product_model;
    use crate::catalog::adapter::outgoing::sea_orm_entity::products;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn ledger(db: MockDatabase) -> StockLedgerPostgres {
        StockLedgerPostgres::new(Arc::new(db.into_connection()))
    }

    fn updated(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    fn line(model: &products::Model, quantity: u32) -> CartLine {
        CartLine {
            product_id: model.id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_commit_decrements_each_line() {
        let a = product_model("A", 5, None);
        let b = product_model("B", 2, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a.clone(), b.clone()]])
            .append_exec_results([updated(1), updated(1)]);

        let plan = ledger(db)
            .commit_purchase(&[line(&a, 3), line(&b, 2)])
            .await
            .unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].name, "A");
        assert_eq!(plan[1].quantity, 2);
    }

    #[tokio::test]
    async fn test_locks_rows_and_guards_decrement() {
        let a = product_model("A", 5, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a.clone()]])
            .append_exec_results([updated(1)]);
        let ledger = ledger(db);

        ledger.commit_purchase(&[line(&a, 1)]).await.unwrap();

        let conn = Arc::try_unwrap(ledger.db).ok().unwrap();
        let log = format!("{:?}", conn.into_transaction_log());
        assert!(log.contains("FOR UPDATE"));
        assert!(log.contains(">="));
    }

    #[tokio::test]
    async fn test_short_stock_rolls_back_without_writing() {
        let a = product_model("A", 1, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![a.clone()]]);

        let err = ledger(db).commit_purchase(&[line(&a, 2)]).await.unwrap_err();

        assert_eq!(
            err,
            StockLedgerError::Rejected(PurchaseViolation::InsufficientStock {
                product_name: "A".to_string(),
                available: 1,
                requested: 2,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_rows_are_unavailable() {
        let a = product_model("A", 1, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<products::Model>::new()]);

        let err = ledger(db).commit_purchase(&[line(&a, 1)]).await.unwrap_err();

        assert_eq!(
            err,
            StockLedgerError::Rejected(PurchaseViolation::Unavailable(vec![a.id]))
        );
    }

    #[tokio::test]
    async fn test_guarded_update_missing_row_rejects() {
        let a = product_model("A", 5, None);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a.clone()]])
            .append_exec_results([updated(0)]);

        let err = ledger(db).commit_purchase(&[line(&a, 5)]).await.unwrap_err();

        assert!(matches!(
            err,
            StockLedgerError::Rejected(PurchaseViolation::InsufficientStock { available: 5, .. })
        ));
    }

    #[tokio::test]
    async fn test_query_error_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())]);

        let err = ledger(db)
            .commit_purchase(&[CartLine {
                product_id: uuid::Uuid::new_v4(),
                quantity: 1,
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, StockLedgerError::DatabaseError(_)));
    }
}
