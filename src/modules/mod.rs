pub mod auth;
pub mod contact;
pub mod password_reset;
