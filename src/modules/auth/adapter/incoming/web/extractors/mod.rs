pub mod auth;

pub use auth::{
    AdminOnly, AdminUser, AuthenticatedUser, OptionalUser, RequireRole, RolePolicy, StaffOnly,
    StaffUser,
};
