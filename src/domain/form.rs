//! Create/edit form binding.
//!
//! A [`FormBinding`] holds a draft in one of two modes. In
//! [`FormMode::Create`] the draft starts from defaults; in
//! [`FormMode::Edit`] it is bound to one record by identity and starts from
//! that record's values. [`FormBinding::submit`] validates the draft and
//! yields a [`FormEffect`] for the collection store;
//! [`FormBinding::cancel`] drops the draft without touching the store.

use chrono::{DateTime, Utc};

use super::{Record, RecordId, Registry};
use crate::error::WinestaError;

/// Editable field set for one record type.
pub trait Draft: Clone + std::fmt::Debug + Sized {
    /// Record type this draft creates and edits.
    type Record: Record;

    /// Returns the create-mode defaults.
    fn blank(now: DateTime<Utc>) -> Self;

    /// Returns the edit-mode prefill for `record`.
    fn from_record(record: &Self::Record) -> Self;

    /// Checks required fields and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::InvalidField`] naming the first bad field.
    fn validate(&self, now: DateTime<Utc>) -> Result<(), WinestaError>;

    /// Builds a new record with the given identity and timestamps set to
    /// `now`.
    fn into_record(self, id: RecordId, now: DateTime<Utc>) -> Self::Record;

    /// Overwrites `record`'s editable fields and sets its update timestamp.
    fn apply_to(self, record: &mut Self::Record, now: DateTime<Utc>);
}

/// Whether a form creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// No backing record.
    Create,
    /// Bound to the record with this identity.
    Edit(RecordId),
}

impl FormMode {
    /// Wire name of the mode: `"create"` or `"edit"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit(_) => "edit",
        }
    }

    /// Identity of the bound record in edit mode.
    #[must_use]
    pub const fn record_id(&self) -> Option<RecordId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(*id),
        }
    }
}

/// Store mutation produced by a successful submit.
#[derive(Debug)]
pub enum FormEffect<D: Draft> {
    /// Append a freshly built record.
    Insert(D::Record),
    /// Overwrite the record with `id` from `draft`.
    Update {
        /// Identity of the record to overwrite.
        id: RecordId,
        /// Validated field values.
        draft: D,
        /// New update timestamp.
        updated_at: DateTime<Utc>,
    },
}

impl<D: Draft> FormEffect<D> {
    /// Applies the effect to `registry`, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`WinestaError::RecordNotFound`] if an update targets a
    /// record that has since been deleted, or
    /// [`WinestaError::DuplicateRecord`] on an identity clash.
    pub async fn apply(self, registry: &Registry<D::Record>) -> Result<D::Record, WinestaError> {
        match self {
            Self::Insert(record) => {
                registry.insert(record.clone()).await?;
                Ok(record)
            }
            Self::Update {
                id,
                draft,
                updated_at,
            } => {
                registry
                    .update(id, move |record| draft.apply_to(record, updated_at))
                    .await
            }
        }
    }
}

/// A draft bound to zero or one record.
#[derive(Debug, Clone)]
pub struct FormBinding<D> {
    mode: FormMode,
    draft: D,
}

impl<D: Draft> FormBinding<D> {
    /// Opens a create-mode form with default values.
    #[must_use]
    pub fn create(now: DateTime<Utc>) -> Self {
        Self {
            mode: FormMode::Create,
            draft: D::blank(now),
        }
    }

    /// Opens an edit-mode form pre-filled from `record`.
    #[must_use]
    pub fn edit(record: &D::Record) -> Self {
        Self {
            mode: FormMode::Edit(record.id()),
            draft: D::from_record(record),
        }
    }

    /// Replaces every field of the draft with the submitted values.
    #[must_use]
    pub fn with_draft(mut self, draft: D) -> Self {
        self.draft = draft;
        self
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    /// Current draft values.
    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable access to the draft values.
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Label for the submit action, e.g. `"Add Wine"` / `"Update Wine"`.
    #[must_use]
    pub fn submit_label(&self, noun: &str) -> String {
        match self.mode {
            FormMode::Create => format!("Add {noun}"),
            FormMode::Edit(_) => format!("Update {noun}"),
        }
    }

    /// Validates the draft and turns it into a store effect.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation error; nothing is produced for the
    /// store in that case.
    pub fn submit(self, now: DateTime<Utc>) -> Result<FormEffect<D>, WinestaError> {
        self.draft.validate(now)?;
        Ok(match self.mode {
            FormMode::Create => FormEffect::Insert(self.draft.into_record(RecordId::new(), now)),
            FormMode::Edit(id) => FormEffect::Update {
                id,
                draft: self.draft,
                updated_at: now,
            },
        })
    }

    /// Discards the draft.
    pub fn cancel(self) {
        tracing::debug!(mode = self.mode.as_str(), "form cancelled");
    }
}

/// Rejects blank (empty or whitespace-only) required text.
///
/// # Errors
///
/// Returns [`WinestaError::InvalidField`] for `field` when `value` is blank.
pub fn require_text(field: &'static str, value: &str) -> Result<(), WinestaError> {
    if value.trim().is_empty() {
        return Err(WinestaError::invalid_field(field, "is required"));
    }
    Ok(())
}
