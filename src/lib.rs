//! Admin client for the PFMO health-facility monitoring backend.
//!
//! The core is the form schema tooling: field models, the visual builder,
//! the JSON codec with its raw-text editor, and the catalog controller that
//! persists forms through the backend.

// API module for the admin client
pub mod api;

// Re-export api modules at crate root (so services can use crate::models, crate::storage)
pub use api::config;
pub use api::models;
pub use api::observability;
pub use api::services;
pub use api::storage;
