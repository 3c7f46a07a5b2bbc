pub mod auth;
pub mod booking;
pub mod errors;
pub mod lifecycle;
pub mod store;
