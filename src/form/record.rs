//! Single-record form for steps that produce one object instead of a list

use crate::schema::{Draft, StepSchema, ValidationErrors};

/// Edits one record, pre-filled from the aggregate slot
pub struct RecordForm<S: StepSchema> {
    draft: S::Draft,
}

impl<S: StepSchema> std::fmt::Debug for RecordForm<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordForm")
            .field("draft", &self.draft)
            .finish()
    }
}

impl<S: StepSchema> RecordForm<S> {
    pub fn new(initial: &S::Entry) -> Self {
        Self {
            draft: S::draft_from(initial),
        }
    }

    pub fn draft(&self) -> &S::Draft {
        &self.draft
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        self.draft.set(field, value);
    }

    /// Validate the record for handing to the controller
    pub fn commit(&self) -> Result<S::Entry, ValidationErrors> {
        S::validate(&self.draft)
    }
}
