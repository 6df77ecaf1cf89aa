//! Test Creation Wizard
//!
//! Builds a test in four steps against the test-management REST API:
//! basic details, question authoring, confirmation and publish.
//!
//! ## Module Structure
//!
//! - `api/`: wire types, the [`TestBackend`] seam and its reqwest client
//! - `wizard/`: draft store, step logic and the controller tying them together
//! - `routes`: the client-side route surface
//! - `session`: login and token storage
//! - `config`: settings file and defaults

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod wizard;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, TestBackend};
pub use config::{ApiConfig, WizardConfig};
pub use error::{ApiError, WizardError};
pub use routes::{Route, WizardMode};
pub use session::Session;
pub use wizard::{WizardController, WizardStep, WizardStore};
