pub mod auth;
pub mod supplier;
