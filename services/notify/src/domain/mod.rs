pub mod email;
pub mod phone;
pub mod port;
pub mod types;
pub mod whatsapp;
