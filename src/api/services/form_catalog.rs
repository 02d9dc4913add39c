//! Form catalog controller.
//!
//! Fronts the backend for listing, creating, replacing and deleting forms.
//! The displayed list is never patched locally: after every successful
//! mutation it is re-fetched. Fetches may overlap; each one takes a ticket
//! and a result is only shown if no later-issued fetch has been shown yet.

use super::default_form::{DEFAULT_FORM_NAME, default_form_draft};
use crate::models::{Form, FormDraft, RecordId};
use crate::storage::{ClientError, FormsBackend};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

#[derive(Debug, Default)]
struct CatalogView {
    forms: Vec<Form>,
    ticket: u64,
}

pub struct FormCatalog {
    backend: Arc<dyn FormsBackend>,
    view: RwLock<CatalogView>,
    next_ticket: AtomicU64,
}

impl FormCatalog {
    pub fn new(backend: Arc<dyn FormsBackend>) -> Self {
        Self {
            backend,
            view: RwLock::new(CatalogView::default()),
            next_ticket: AtomicU64::new(0),
        }
    }

    /// Forms currently displayed, as of the last applied fetch.
    pub fn forms(&self) -> Vec<Form> {
        self.view
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .forms
            .clone()
    }

    pub fn find(&self, id: &RecordId) -> Option<Form> {
        self.forms().into_iter().find(|f| &f.id == id)
    }

    /// Re-fetch the list and return the live form `id`.
    pub async fn get(&self, id: &RecordId) -> Result<Form, ClientError> {
        self.list()
            .await?
            .into_iter()
            .find(|f| &f.id == id)
            .ok_or_else(|| ClientError::NotFound {
                entity_type: "form".to_string(),
                entity_id: id.to_string(),
            })
    }

    /// Fetch every form, active or not, and display those not deleted, in
    /// backend order. Returns the displayed list, which is this fetch's
    /// result unless a newer fetch has already been applied.
    pub async fn list(&self) -> Result<Vec<Form>, ClientError> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let forms: Vec<Form> = self
            .backend
            .list_forms(false)
            .await?
            .into_iter()
            .filter(|f| !f.is_deleted)
            .collect();

        let mut view = self.view.write().unwrap_or_else(|e| e.into_inner());
        if ticket > view.ticket {
            view.ticket = ticket;
            view.forms = forms;
        } else {
            info!(ticket, applied = view.ticket, "Discarding superseded form list");
        }
        Ok(view.forms.clone())
    }

    pub async fn create(&self, draft: &FormDraft) -> Result<Form, ClientError> {
        validate_draft(draft)?;
        let form = self.backend.create_form(draft).await?;
        info!(form_id = %form.id, name = %form.name, "Created form");
        self.refresh().await;
        Ok(form)
    }

    /// Replace the record `id` with `draft` in full.
    pub async fn update(&self, id: &RecordId, draft: &FormDraft) -> Result<Form, ClientError> {
        validate_draft(draft)?;
        let form = self.backend.update_form(id, draft).await?;
        info!(form_id = %id, "Updated form");
        self.refresh().await;
        Ok(form)
    }

    /// Deactivate a form, or remove it for good when `permanent` is set.
    ///
    /// A rejection (typically a permanent delete of a form that still has
    /// submissions) is returned unchanged and the displayed list is left as
    /// it was.
    pub async fn delete(&self, id: &RecordId, permanent: bool) -> Result<(), ClientError> {
        if let Err(e) = self.backend.delete_form(id, permanent).await {
            warn!(form_id = %id, permanent, "Form delete rejected: {}", e);
            return Err(e);
        }
        let action = if permanent {
            "permanently deleted"
        } else {
            "deactivated"
        };
        info!(form_id = %id, "Form {}", action);
        self.refresh().await;
        Ok(())
    }

    /// Create the stock PFMO form. If a live form already carries the
    /// reserved name, `confirm` decides whether to create another; `Ok(None)`
    /// means it declined.
    pub async fn create_default<F>(&self, confirm: F) -> Result<Option<Form>, ClientError>
    where
        F: FnOnce(&Form) -> bool,
    {
        let forms = self.list().await?;
        if let Some(existing) = forms
            .iter()
            .find(|f| f.name == DEFAULT_FORM_NAME && !f.is_deleted)
        {
            if !confirm(existing) {
                info!("Default form already exists, not creating another");
                return Ok(None);
            }
        }
        self.create(&default_form_draft()).await.map(Some)
    }

    // The mutation already succeeded; a failed refresh only leaves the view stale.
    async fn refresh(&self) {
        if let Err(e) = self.list().await {
            warn!("Failed to refresh form list: {}", e);
        }
    }
}

fn validate_draft(draft: &FormDraft) -> Result<(), ClientError> {
    if draft.name.trim().is_empty() {
        return Err(ClientError::InvalidInput("Form name is required".to_string()));
    }
    if draft.version.trim().is_empty() {
        return Err(ClientError::InvalidInput("Form version is required".to_string()));
    }
    Ok(())
}
