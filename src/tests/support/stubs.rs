//! Default use cases for `TestAppStateBuilder`. Each one fails loudly so
//! a test that forgets to install the real double gets a 500, not a
//! false positive.

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserResult;
use crate::auth::application::use_cases::create_employee::ICreateEmployeeUseCase;
use crate::auth::application::use_cases::list_users::{IListUsersUseCase, ListUsersError, UserSummary};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest,
};
use crate::cart::application::domain::entities::{CartLine, Quantity};
use crate::cart::application::ports::incoming::use_cases::{
    AddToCartUseCase, CartError, GetCartUseCase, RemoveFromCartUseCase, SetCartQuantityUseCase,
};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductCommand, CreateProductError, CreateProductUseCase, DeleteProductError,
    DeleteProductUseCase, GetProductsError, GetProductsUseCase, GetSingleProductError,
    GetSingleProductUseCase, UpdateProductCommand, UpdateProductError, UpdateProductUseCase,
};
use crate::checkout::application::ports::incoming::use_cases::{
    Buyer, CheckoutError, CheckoutOutcome, CheckoutUseCase,
};

const UNUSED: &str = "stub use case called";

// ============================ Auth =============================

pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(&self, _: RegisterUserRequest) -> Result<UserResult, RegisterUserError> {
        Err(RegisterUserError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubCreateEmployeeUseCase;

#[async_trait]
impl ICreateEmployeeUseCase for StubCreateEmployeeUseCase {
    async fn execute(&self, _: RegisterUserRequest) -> Result<UserResult, RegisterUserError> {
        Err(RegisterUserError::RepositoryError(UNUSED.to_string()))
    }
}

pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::QueryError(UNUSED.to_string()))
    }
}

pub struct StubListUsersUseCase;

#[async_trait]
impl IListUsersUseCase for StubListUsersUseCase {
    async fn execute(&self) -> Result<Vec<UserSummary>, ListUsersError> {
        Ok(Vec::new())
    }
}

// ============================ Catalog =============================

pub struct StubCatalog;

#[async_trait]
impl CreateProductUseCase for StubCatalog {
    async fn execute(&self, _: CreateProductCommand) -> Result<Product, CreateProductError> {
        Err(CreateProductError::RepositoryError(UNUSED.to_string()))
    }
}

#[async_trait]
impl UpdateProductUseCase for StubCatalog {
    async fn execute(&self, _: Uuid, _: UpdateProductCommand) -> Result<Product, UpdateProductError> {
        Err(UpdateProductError::RepositoryError(UNUSED.to_string()))
    }
}

#[async_trait]
impl DeleteProductUseCase for StubCatalog {
    async fn execute(&self, _: Uuid) -> Result<Product, DeleteProductError> {
        Err(DeleteProductError::RepositoryError(UNUSED.to_string()))
    }
}

#[async_trait]
impl GetProductsUseCase for StubCatalog {
    async fn execute(&self) -> Result<Vec<Product>, GetProductsError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl GetSingleProductUseCase for StubCatalog {
    async fn execute(&self, _: Uuid) -> Result<Product, GetSingleProductError> {
        Err(GetSingleProductError::NotFound)
    }
}

// ============================ Cart / Checkout =============================

pub struct StubCart;

#[async_trait]
impl GetCartUseCase for StubCart {
    async fn execute(&self, _: Uuid) -> Result<Vec<CartLine>, CartError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl AddToCartUseCase for StubCart {
    async fn execute(&self, _: Uuid, _: Uuid, _: Quantity) -> Result<Vec<CartLine>, CartError> {
        Err(CartError::StoreError(UNUSED.to_string()))
    }
}

#[async_trait]
impl SetCartQuantityUseCase for StubCart {
    async fn execute(&self, _: Uuid, _: Uuid, _: u32) -> Result<Vec<CartLine>, CartError> {
        Err(CartError::StoreError(UNUSED.to_string()))
    }
}

#[async_trait]
impl RemoveFromCartUseCase for StubCart {
    async fn execute(&self, _: Uuid, _: Uuid) -> Result<Vec<CartLine>, CartError> {
        Ok(Vec::new())
    }
}

pub struct StubCheckout;

#[async_trait]
impl CheckoutUseCase for StubCheckout {
    async fn execute(&self, _: Buyer) -> Result<CheckoutOutcome, CheckoutError> {
        Err(CheckoutError::CartEmpty)
    }
}
