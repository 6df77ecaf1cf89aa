//! Test-management API
//!
//! Typed request/response records, the [`TestBackend`] trait the wizard is
//! written against, and its reqwest implementation.

pub mod backend;
pub mod client;
pub mod types;

pub use backend::TestBackend;
pub use client::ApiClient;
pub use types::*;
