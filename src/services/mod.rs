pub mod hashing;
pub mod jwt;
pub mod keyed_lock;
pub mod mailer;
pub mod security;
