use actix_web::{get, web, HttpResponse, Responder};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::cart::application::ports::outgoing::CartStore;

#[derive(Serialize)]
struct ServiceInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessResponse {
    status: &'static str,
    database: &'static str,
    cart_store: &'static str,
}

#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - Database `SELECT 1`
/// - Cart store ping (Redis `PING` when configured)
#[get("/ready")]
pub async fn readiness(
    db: web::Data<Arc<DatabaseConnection>>,
    cart_store: web::Data<Arc<dyn CartStore>>,
) -> impl Responder {
    let database = match db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1",
        ))
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            warn!(error = %e, "Readiness: database unreachable");
            "unhealthy"
        }
    };

    let cart_store = match cart_store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!(error = %e, "Readiness: cart store unreachable");
            "unhealthy"
        }
    };

    if database == "ok" && cart_store == "ok" {
        HttpResponse::Ok().json(ReadinessResponse {
            status: "ok",
            database,
            cart_store,
        })
    } else {
        HttpResponse::ServiceUnavailable().json(ReadinessResponse {
            status: "unhealthy",
            database,
            cart_store,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::adapter::outgoing::in_memory_cart_store::InMemoryCartStore;
    use crate::cart::application::domain::entities::Cart;
    use crate::cart::application::ports::outgoing::CartStoreError;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    struct DownStore;

    #[async_trait]
    impl CartStore for DownStore {
        async fn load(&self, _: Uuid) -> Result<Cart, CartStoreError> {
            Err(CartStoreError::Backend("down".to_string()))
        }
        async fn save(&self, _: Uuid, _: &Cart) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("down".to_string()))
        }
        async fn clear(&self, _: Uuid) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("down".to_string()))
        }
        async fn ping(&self) -> Result<(), CartStoreError> {
            Err(CartStoreError::Backend("down".to_string()))
        }
    }

    fn db_ok() -> Arc<DatabaseConnection> {
        Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        )
    }

    async fn ready(
        db: Arc<DatabaseConnection>,
        store: Arc<dyn CartStore>,
    ) -> (u16, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(store))
                .service(readiness),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;
        let status = resp.status().as_u16();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_index_reports_name() {
        let app = test::init_service(App::new().service(index)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "stock_shop_api");
    }

    #[actix_web::test]
    async fn test_health_is_ok() {
        let app = test::init_service(App::new().service(health)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_ready_when_dependencies_respond() {
        let (status, body) = ready(db_ok(), Arc::new(InMemoryCartStore::new())).await;

        assert_eq!(status, 200);
        assert_eq!(body["cartStore"], "ok");
    }

    #[actix_web::test]
    async fn test_not_ready_when_cart_store_is_down() {
        let (status, body) = ready(db_ok(), Arc::new(DownStore)).await;

        assert_eq!(status, 503);
        assert_eq!(body["database"], "ok");
        assert_eq!(body["cartStore"], "unhealthy");
    }

    #[actix_web::test]
    async fn test_not_ready_when_database_is_down() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_errors([DbErr::Custom("refused".to_string())])
                .into_connection(),
        );

        let (status, body) = ready(db, Arc::new(InMemoryCartStore::new())).await;

        assert_eq!(status, 503);
        assert_eq!(body["database"], "unhealthy");
    }
}
