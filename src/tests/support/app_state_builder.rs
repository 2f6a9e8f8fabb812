use actix_web::web;
use std::sync::Arc;

use crate::auth::application::use_cases::create_employee::ICreateEmployeeUseCase;
use crate::auth::application::use_cases::list_users::IListUsersUseCase;
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::register_user::IRegisterUserUseCase;
use crate::cart::application::cart_use_cases::CartUseCases;
use crate::catalog::application::catalog_use_cases::CatalogUseCases;
use crate::catalog::application::domain::policies::ImageUploadPolicy;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductsUseCase, GetSingleProductUseCase,
    UpdateProductUseCase,
};
use crate::checkout::application::ports::incoming::use_cases::CheckoutUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;

pub struct TestAppStateBuilder {
    register_user: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    create_employee: Arc<dyn ICreateEmployeeUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    list_users: Arc<dyn IListUsersUseCase + Send + Sync>,
    catalog: CatalogUseCases,
    image_policy: ImageUploadPolicy,
    cart: CartUseCases,
    checkout: Arc<dyn CheckoutUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let catalog = Arc::new(StubCatalog);
        Self {
            register_user: Arc::new(StubRegisterUserUseCase),
            create_employee: Arc::new(StubCreateEmployeeUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            list_users: Arc::new(StubListUsersUseCase),
            catalog: CatalogUseCases {
                create: catalog.clone(),
                update: catalog.clone(),
                delete: catalog.clone(),
                get_list: catalog.clone(),
                get_single: catalog,
            },
            image_policy: ImageUploadPolicy::default(),
            cart: CartUseCases::from_service(Arc::new(StubCart)),
            checkout: Arc::new(StubCheckout),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user(mut self, uc: impl IRegisterUserUseCase + 'static) -> Self {
        self.register_user = Arc::new(uc);
        self
    }

    pub fn with_create_employee(mut self, uc: impl ICreateEmployeeUseCase + 'static) -> Self {
        self.create_employee = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_list_users(mut self, uc: impl IListUsersUseCase + 'static) -> Self {
        self.list_users = Arc::new(uc);
        self
    }

    pub fn with_create_product(mut self, uc: Arc<dyn CreateProductUseCase + Send + Sync>) -> Self {
        self.catalog.create = uc;
        self
    }

    pub fn with_update_product(mut self, uc: Arc<dyn UpdateProductUseCase + Send + Sync>) -> Self {
        self.catalog.update = uc;
        self
    }

    pub fn with_delete_product(mut self, uc: Arc<dyn DeleteProductUseCase + Send + Sync>) -> Self {
        self.catalog.delete = uc;
        self
    }

    pub fn with_get_products(mut self, uc: Arc<dyn GetProductsUseCase + Send + Sync>) -> Self {
        self.catalog.get_list = uc;
        self
    }

    pub fn with_get_single_product(
        mut self,
        uc: Arc<dyn GetSingleProductUseCase + Send + Sync>,
    ) -> Self {
        self.catalog.get_single = uc;
        self
    }

    pub fn with_image_policy(mut self, policy: ImageUploadPolicy) -> Self {
        self.image_policy = policy;
        self
    }

    pub fn with_cart(mut self, cart: CartUseCases) -> Self {
        self.cart = cart;
        self
    }

    pub fn with_checkout(mut self, uc: Arc<dyn CheckoutUseCase + Send + Sync>) -> Self {
        self.checkout = uc;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_use_case: self.register_user,
            create_employee_use_case: self.create_employee,
            login_user_use_case: self.login_user,
            list_users_use_case: self.list_users,
            catalog: self.catalog,
            image_policy: self.image_policy,
            cart: self.cart,
            checkout: self.checkout,
        })
    }
}
