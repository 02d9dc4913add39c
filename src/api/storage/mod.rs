//! Storage module for the client.
//!
//! Provides the backend trait the form catalog persists through, the error
//! type shared by every backend call, and the on-disk session state.

pub mod error;
pub mod session_store;
pub mod traits;

pub use error::ClientError;
pub use session_store::{SessionStore, Theme};
pub use traits::FormsBackend;
