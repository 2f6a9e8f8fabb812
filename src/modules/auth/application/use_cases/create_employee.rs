use async_trait::async_trait;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::{
    RoleAssignment, UserQuery, UserRepository, UserResult,
};

use super::register_user::{RegisterUserError, RegisterUserRequest, RegisterUserUseCase};

/// Staff account creation. Always yields the `employee` role, whatever
/// the table holds.
#[async_trait]
pub trait ICreateEmployeeUseCase: Send + Sync {
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserResult, RegisterUserError>;
}

#[async_trait]
impl<Q, R> ICreateEmployeeUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserResult, RegisterUserError> {
        self.register(request, RoleAssignment::Fixed(Role::Employee))
            .await
    }
}
