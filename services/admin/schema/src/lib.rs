//! sea-orm entities for the public-schema tables managed by the admin service.

pub mod permissions;
pub mod profiles;
pub mod role_permissions;
pub mod roles;
pub mod user_roles;
