pub mod create_employee;
pub mod list_users;
pub mod login_user;
pub mod register_user;
pub mod verify_token;

pub use create_employee::{create_employee_handler, __path_create_employee_handler};
pub use list_users::{list_users_handler, __path_list_users_handler, UserListItem, UserListResponse};
pub use login_user::{login_user_handler, __path_login_user_handler, LoginRequestDto, LoginResponse, LoginUserInfo};
pub use register_user::{
    register_user_handler, __path_register_user_handler, CreateUserRequest, RegisterUserResponse, RegisteredUser,
};
pub use verify_token::{verify_token_handler, __path_verify_token_handler, VerifiedTokenUser, VerifyTokenResponse};
