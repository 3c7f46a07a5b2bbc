pub mod appointment;
pub mod db;
pub mod errors;
pub mod invoice;
pub mod patch;
pub mod record;
pub mod service;
pub mod user;
