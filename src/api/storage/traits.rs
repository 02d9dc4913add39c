//! Backend trait definitions for form catalog persistence.

use super::ClientError;
use crate::models::{Form, FormDraft, RecordId};

/// Persistence operations the form catalog needs from the backend.
///
/// [`crate::services::ApiClient`] implements this over HTTP.
#[async_trait::async_trait]
pub trait FormsBackend: Send + Sync {
    /// List forms, including inactive ones unless `active_only` is set.
    /// Soft-deleted records are returned too; filtering is the caller's job.
    async fn list_forms(&self, active_only: bool) -> Result<Vec<Form>, ClientError>;

    /// Create a new form
    async fn create_form(&self, draft: &FormDraft) -> Result<Form, ClientError>;

    /// Replace an existing form with `draft`
    async fn update_form(&self, id: &RecordId, draft: &FormDraft) -> Result<Form, ClientError>;

    /// Deactivate (`permanent == false`) or remove a form. A permanent delete
    /// is refused while the form has submissions.
    async fn delete_form(&self, id: &RecordId, permanent: bool) -> Result<(), ClientError>;
}
