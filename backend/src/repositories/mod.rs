//! Record store access layer

pub mod user;

pub use user::{UserRecord, UserRepository};
