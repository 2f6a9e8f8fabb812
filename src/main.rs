pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::{auth, cart, catalog, checkout, email};

#[cfg(test)]
mod tests;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::{
    create_employee::ICreateEmployeeUseCase,
    list_users::{IListUsersUseCase, ListUsersUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::cart::adapter::outgoing::in_memory_cart_store::InMemoryCartStore;
use crate::cart::adapter::outgoing::redis_cart_store::RedisCartStore;
use crate::cart::application::cart_locks::CartLocks;
use crate::cart::application::cart_use_cases::CartUseCases;
use crate::cart::application::ports::outgoing::CartStore;
use crate::cart::application::service::CartService;
use crate::catalog::adapter::incoming::web::routes::IMAGES_PATH;
use crate::catalog::adapter::outgoing::fs_image_storage::FsImageStorage;
use crate::catalog::adapter::outgoing::product_query_postgres::ProductQueryPostgres;
use crate::catalog::adapter::outgoing::product_repository_postgres::ProductRepositoryPostgres;
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::domain::policies::ImageUploadPolicy;
use crate::catalog::application::image_claims::ImageClaims;
use crate::catalog::application::ports::outgoing::ImageStorage;
use crate::catalog::application::service::{
    CreateProductService, DeleteProductService, GetProductsService, GetSingleProductService,
    UpdateProductService,
};
use crate::checkout::adapter::outgoing::stock_ledger_postgres::StockLedgerPostgres;
use crate::checkout::application::ports::incoming::use_cases::CheckoutUseCase;
use crate::checkout::application::service::CheckoutService;
use crate::config::{AppConfig, CartStoreBackend};
use crate::email::adapter::outgoing::smtp_sender::sender_from_settings;
use crate::email::application::service::{PurchaseEmailNotifier, RetryPolicy};
use crate::shared::api::custom_json_config;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config as RedisConfig, Runtime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub create_employee_use_case: Arc<dyn ICreateEmployeeUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub list_users_use_case: Arc<dyn IListUsersUseCase + Send + Sync>,
    pub catalog: CatalogUseCases,
    pub image_policy: ImageUploadPolicy,
    pub cart: CartUseCases,
    pub checkout: Arc<dyn CheckoutUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    // Environment variable loading: .env.{RUST_ENV} first, then .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    if dotenvy::from_filename(format!(".env.{env}")).is_err() {
        dotenvy::dotenv().ok();
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Redis over TLS needs a process-wide crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(environment = config.environment.as_str(), "Starting application...");

    // Database connection
    let mut opt = ConnectOptions::new(config.database.url.clone());
    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        Migrator::up(&conn, None)
            .await
            .context("failed to apply migrations")?;
        info!("Migrations applied");
    }

    let db_arc = Arc::new(conn);

    // Cart store
    let cart_store: Arc<dyn CartStore> = match &config.cart_store {
        CartStoreBackend::Memory => {
            info!("Cart store: in-memory");
            Arc::new(InMemoryCartStore::new())
        }
        CartStoreBackend::Redis { url } => {
            let pool = RedisConfig::from_url(url)
                .create_pool(Some(Runtime::Tokio1))
                .context("failed to create Redis pool")?;
            info!("Cart store: redis");
            Arc::new(RedisCartStore::new(Arc::new(pool)))
        }
    };

    // Auth
    let jwt_service = JwtTokenService::new(JwtConfig::from_env(config.environment)?);
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env()?);

    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));

    let register_user_use_case = Arc::new(RegisterUserUseCase::new(
        user_query.clone(),
        user_repo,
        Arc::clone(&password_hasher),
    ));
    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        password_hasher,
        token_provider.clone(),
    );
    let list_users_use_case = ListUsersUseCase::new(user_query);

    // Catalog
    let image_policy = ImageUploadPolicy::from_env()?;
    let images_dir = config.images_dir.clone();
    let image_storage: Arc<dyn ImageStorage> = Arc::new(
        FsImageStorage::open(&images_dir, image_policy.dedup)
            .await
            .context("failed to open image directory")?,
    );

    let product_repo = ProductRepositoryPostgres::new(Arc::clone(&db_arc));
    let product_query = ProductQueryPostgres::new(Arc::clone(&db_arc));
    // Shared by every service that stores or removes images
    let image_claims = Arc::new(ImageClaims::new());

    let catalog = CatalogUseCases {
        create: Arc::new(CreateProductService::new(
            product_repo.clone(),
            product_query.clone(),
            Arc::clone(&image_storage),
            Arc::clone(&image_claims),
        )),
        update: Arc::new(UpdateProductService::new(
            product_repo.clone(),
            product_query.clone(),
            Arc::clone(&image_storage),
            Arc::clone(&image_claims),
        )),
        delete: Arc::new(DeleteProductService::new(
            product_repo,
            product_query.clone(),
            image_storage,
            image_claims,
        )),
        get_list: Arc::new(GetProductsService::new(product_query.clone())),
        get_single: Arc::new(GetSingleProductService::new(product_query.clone())),
    };

    // Cart and checkout share the per-user locks
    let cart_locks = Arc::new(CartLocks::new());
    let cart = CartUseCases::from_service(Arc::new(CartService::new(
        Arc::clone(&cart_store),
        product_query.clone(),
        Arc::clone(&cart_locks),
    )));

    let email_sender = sender_from_settings(&config.smtp, &config.email_from)?;
    let notifier = PurchaseEmailNotifier::new(Arc::from(email_sender), RetryPolicy::default());
    let checkout = CheckoutService::new(
        Arc::clone(&cart_store),
        product_query,
        Arc::new(StockLedgerPostgres::new(Arc::clone(&db_arc))),
        cart_locks,
        Arc::new(notifier),
    );

    let state = AppState {
        register_user_use_case: register_user_use_case.clone(),
        create_employee_use_case: register_user_use_case,
        login_user_use_case: Arc::new(login_user_use_case),
        list_users_use_case: Arc::new(list_users_use_case),
        catalog,
        image_policy,
        cart,
        checkout: Arc::new(checkout),
    };

    let server_url = config.bind_address();
    let cors_origins = config.cors_allowed_origins.clone();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        let cors = cors_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db_arc)))
            .app_data(web::Data::new(Arc::clone(&cart_store)))
            .app_data(custom_json_config())
            .service(actix_files::Files::new(IMAGES_PATH, &images_dir))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::index);
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::create_employee_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::list_users_handler);
    // Products
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_products_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::get_single_product_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::create_product_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::update_product_handler);
    cfg.service(crate::catalog::adapter::incoming::web::routes::delete_product_handler);
    // Cart (checkout before the {productId} routes)
    cfg.service(crate::checkout::adapter::incoming::web::routes::checkout_handler);
    cfg.service(crate::cart::adapter::incoming::web::routes::get_cart_handler);
    cfg.service(crate::cart::adapter::incoming::web::routes::add_to_cart_handler);
    cfg.service(crate::cart::adapter::incoming::web::routes::set_cart_quantity_handler);
    cfg.service(crate::cart::adapter::incoming::web::routes::remove_from_cart_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
