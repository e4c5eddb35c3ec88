//! Repeatable-entry collector shared by every list step

use thiserror::Error;

use crate::schema::{Draft, QuotaExceeded, StepSchema, ValidationErrors};

/// Why a draft was not appended
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddEntryError {
    /// One or more fields failed validation
    #[error("entry is invalid: {0}")]
    Invalid(#[from] ValidationErrors),
    /// The entry is valid but the list is already at its limit
    #[error(transparent)]
    Quota(#[from] QuotaExceeded),
}

impl AddEntryError {
    /// Field errors, if this is a validation failure
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AddEntryError::Invalid(errors) => Some(errors),
            AddEntryError::Quota(_) => None,
        }
    }
}

/// Builds an ordered list of entries one validated draft at a time
///
/// The list starts from whatever the aggregate slot held, so revisiting a
/// step shows the entries committed last time.
pub struct EntryCollector<S: StepSchema> {
    entries: Vec<S::Entry>,
    draft: S::Draft,
}

impl<S: StepSchema> std::fmt::Debug for EntryCollector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryCollector")
            .field("entries", &self.entries)
            .field("draft", &self.draft)
            .finish()
    }
}

impl<S: StepSchema> EntryCollector<S> {
    pub fn new(initial: Vec<S::Entry>) -> Self {
        Self {
            entries: initial,
            draft: S::Draft::default(),
        }
    }

    pub fn entries(&self) -> &[S::Entry] {
        &self.entries
    }

    pub fn draft(&self) -> &S::Draft {
        &self.draft
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        self.draft.set(field, value);
    }

    /// Check the in-progress draft without appending it
    ///
    /// List-level limits are not part of this check; see [`Self::submit_draft`].
    pub fn validate_draft(&self) -> Result<S::Entry, ValidationErrors> {
        S::validate(&self.draft)
    }

    /// Replace the in-progress draft and try to append it
    pub fn add_entry(&mut self, draft: S::Draft) -> Result<&S::Entry, AddEntryError> {
        self.draft = draft;
        self.submit_draft()
    }

    /// Validate the in-progress draft and append it
    ///
    /// On success the draft is cleared. On any failure the list and the
    /// draft are left as they were so the user can correct and retry.
    pub fn submit_draft(&mut self) -> Result<&S::Entry, AddEntryError> {
        let entry = self.validate_draft()?;
        S::admit(&self.entries, &entry)?;

        tracing::debug!(position = self.entries.len(), "entry added");
        self.entries.push(entry);
        self.draft = S::Draft::default();
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the entry at `position`; out-of-range positions are ignored
    pub fn remove_entry(&mut self, position: usize) -> Option<S::Entry> {
        if position < self.entries.len() {
            tracing::debug!(position, "entry removed");
            Some(self.entries.remove(position))
        } else {
            None
        }
    }

    /// The list as it stands, for handing to the controller
    pub fn commit(&self) -> Vec<S::Entry> {
        self.entries.clone()
    }
}
