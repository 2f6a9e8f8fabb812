pub mod create_employee;
pub mod list_users;
pub mod login_user;
pub mod register_user;
