pub mod caller;
pub mod role;
pub mod user;
