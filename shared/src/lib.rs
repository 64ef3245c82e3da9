//! Auth Service Shared Library
//!
//! Wire types and input validation shared between the backend and any
//! client crates that talk to it.

pub mod types;
pub mod validation;

pub use types::*;
