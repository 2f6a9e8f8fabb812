use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, Set, Statement, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::user_repository::{
    CreateUserData, RoleAssignment, UserRepository, UserRepositoryError, UserResult,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};

/// Key of the transaction-scoped advisory lock that serializes
/// "is this the first account?" decisions.
const FIRST_USER_LOCK_KEY: i64 = 0x5354_4f43_4b01;

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_user_result(model: UserModel, role: Role) -> UserResult {
        UserResult {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            role,
        }
    }

    fn map_db_err(e: DbErr) -> UserRepositoryError {
        let err_str = e.to_string().to_lowercase();
        if err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
        {
            if err_str.contains("email") {
                return UserRepositoryError::EmailAlreadyExists;
            }
            if err_str.contains("full_name") {
                return UserRepositoryError::FullNameAlreadyExists;
            }
            return UserRepositoryError::UserAlreadyExists;
        }
        UserRepositoryError::DatabaseError(e.to_string())
    }

    async fn resolve_role(
        txn: &DatabaseTransaction,
        assignment: RoleAssignment,
    ) -> Result<Role, UserRepositoryError> {
        match assignment {
            RoleAssignment::Fixed(role) => Ok(role),
            RoleAssignment::FirstUserBecomesAdmin => {
                txn.execute(Statement::from_string(
                    txn.get_database_backend(),
                    format!("SELECT pg_advisory_xact_lock({FIRST_USER_LOCK_KEY})"),
                ))
                .await
                .map_err(Self::map_db_err)?;

                let existing = UserEntity::find()
                    .count(txn)
                    .await
                    .map_err(Self::map_db_err)?;

                Ok(Role::for_registration(existing))
            }
        }
    }

    async fn insert_user(
        txn: &DatabaseTransaction,
        data: CreateUserData,
        assignment: RoleAssignment,
    ) -> Result<UserResult, UserRepositoryError> {
        let role = Self::resolve_role(txn, assignment).await?;

        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(data.full_name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            role: Set(role.as_str().to_string()),
            is_activated: Set(false),
            activation_token: Set(Some(data.activation_token)),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(txn).await.map_err(Self::map_db_err)?;
        Ok(Self::map_to_user_result(inserted, role))
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(
        &self,
        data: CreateUserData,
        assignment: RoleAssignment,
    ) -> Result<UserResult, UserRepositoryError> {
        let txn = self.db.begin().await.map_err(Self::map_db_err)?;

        match Self::insert_user(&txn, data, assignment).await {
            Ok(user) => {
                txn.commit().await.map_err(Self::map_db_err)?;
                Ok(user)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }
}
