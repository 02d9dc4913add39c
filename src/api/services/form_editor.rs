//! Edit surface for creating and editing forms.
//!
//! ```text
//! closed -> creating      -> (save | cancel) -> closed
//! closed -> editing(form) -> (save | cancel) -> closed
//! ```
//!
//! One form at a time. The schema can be edited with the visual builder or
//! as raw text; switching between them carries the current schema across.

use super::form_catalog::FormCatalog;
use super::schema_builder::SchemaBuilder;
use super::schema_codec::RawSchemaEditor;
use crate::models::{Form, FormDraft, FormSchema, RecordId};
use crate::storage::ClientError;
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaEditMode {
    #[default]
    Visual,
    RawText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Closed,
    Creating,
    Editing(RecordId),
}

/// Working copy of one form. Discarded on cancel, sent upstream on save.
#[derive(Debug)]
pub struct EditSession {
    target: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub version: String,
    schema: FormSchema,
    mode: SchemaEditMode,
    builder: SchemaBuilder,
    changes: watch::Receiver<FormSchema>,
    raw: Option<RawSchemaEditor>,
}

impl EditSession {
    fn new(target: Option<RecordId>, draft: FormDraft) -> Self {
        let builder = SchemaBuilder::from_schema(&draft.form_schema);
        let changes = builder.subscribe();
        Self {
            target,
            name: draft.name,
            description: draft.description,
            version: draft.version,
            schema: draft.form_schema,
            mode: SchemaEditMode::Visual,
            builder,
            changes,
            raw: None,
        }
    }

    pub fn target(&self) -> Option<&RecordId> {
        self.target.as_ref()
    }

    pub fn mode(&self) -> SchemaEditMode {
        self.mode
    }

    /// The visual builder, while in visual mode.
    pub fn builder(&mut self) -> Option<&mut SchemaBuilder> {
        match self.mode {
            SchemaEditMode::Visual => Some(&mut self.builder),
            SchemaEditMode::RawText => None,
        }
    }

    /// The raw-text buffer, while in raw-text mode.
    pub fn raw(&mut self) -> Option<&mut RawSchemaEditor> {
        self.raw.as_mut()
    }

    /// Current in-memory schema.
    pub fn schema(&mut self) -> &FormSchema {
        self.sync();
        &self.schema
    }

    pub fn switch_mode(&mut self, mode: SchemaEditMode) {
        if mode == self.mode {
            return;
        }
        self.sync();
        match mode {
            SchemaEditMode::RawText => {
                self.raw = Some(RawSchemaEditor::new(self.schema.clone()));
            }
            SchemaEditMode::Visual => {
                self.raw = None;
                self.builder = SchemaBuilder::from_schema(&self.schema);
                self.changes = self.builder.subscribe();
            }
        }
        self.mode = mode;
        debug!(?mode, "Switched schema edit mode");
    }

    pub fn to_draft(&mut self) -> FormDraft {
        self.sync();
        FormDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            form_schema: self.schema.clone(),
            is_active: None,
        }
    }

    fn sync(&mut self) {
        match &self.raw {
            Some(raw) => self.schema = raw.value().clone(),
            None => {
                if self.changes.has_changed().unwrap_or(false) {
                    self.schema = self.changes.borrow_and_update().clone();
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct FormEditor {
    session: Option<EditSession>,
}

impl FormEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        match &self.session {
            None => EditState::Closed,
            Some(session) => match &session.target {
                None => EditState::Creating,
                Some(id) => EditState::Editing(id.clone()),
            },
        }
    }

    pub fn session(&mut self) -> Option<&mut EditSession> {
        self.session.as_mut()
    }

    /// Open a blank form (version "1.0", schema `{}`).
    pub fn open_create(&mut self) -> Result<&mut EditSession, ClientError> {
        self.open(None, FormDraft::default())
    }

    pub fn open_edit(&mut self, form: &Form) -> Result<&mut EditSession, ClientError> {
        self.open(Some(form.id.clone()), FormDraft::from_form(form))
    }

    /// Close without saving. Returns whether anything was open.
    pub fn cancel(&mut self) -> bool {
        self.session.take().is_some()
    }

    /// Create or replace the form through `catalog`. The surface closes only
    /// when the backend accepted it.
    pub async fn save(&mut self, catalog: &FormCatalog) -> Result<Form, ClientError> {
        let session = self.session.as_mut().ok_or(ClientError::NoActiveEdit)?;
        let draft = session.to_draft();
        let saved = match session.target.clone() {
            None => catalog.create(&draft).await?,
            Some(id) => catalog.update(&id, &draft).await?,
        };
        self.session = None;
        info!(form_id = %saved.id, "Saved form");
        Ok(saved)
    }

    fn open(
        &mut self,
        target: Option<RecordId>,
        draft: FormDraft,
    ) -> Result<&mut EditSession, ClientError> {
        if self.session.is_some() {
            return Err(ClientError::EditInProgress);
        }
        Ok(self.session.insert(EditSession::new(target, draft)))
    }
}
